pub mod app_meta {
    pub const LABEL: &str = "storefront";
}

pub const ENV_VAR_SYS_BASE_PATH: &str = "SYS_BASE_PATH";
pub const ENV_VAR_SERVICE_BASE_PATH: &str = "SERVICE_BASE_PATH";
pub const ENV_VAR_CONFIG_FILE_PATH: &str = "CONFIG_FILE_PATH";

pub const EXPECTED_ENV_VAR_LABELS: [&str; 3] = [
    ENV_VAR_SYS_BASE_PATH,
    ENV_VAR_SERVICE_BASE_PATH,
    ENV_VAR_CONFIG_FILE_PATH,
];

pub mod hard_limit {
    // quantity above this is almost certainly a UI glitch, reject early
    pub const MAX_QTY_PER_LINE: u32 = 9999;
    pub const MAX_LINES_PER_CART: usize = 200;
}

pub mod logging {
    use serde::Deserialize;

    #[derive(Deserialize, Debug, Clone, Copy)]
    pub enum Level {
        FATAL,
        ERROR,
        WARNING,
        INFO,
        DEBUG,
        TRACE,
    }

    #[allow(clippy::upper_case_acronyms)]
    #[derive(Deserialize)]
    pub enum Destination {
        CONSOLE,
        LOCALFS,
    }
}

pub mod backend {
    // `HeaderName::from_static` requires the lowercase form
    pub const API_KEY_HEADER: &str = "x-api-key";
}
