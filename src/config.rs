use std::env::VarError;
use std::fs::File;
use std::io::BufReader;
use std::result::Result as DefaultResult;

use serde::Deserialize;

use crate::constant::{
    logging as const_log, ENV_VAR_CONFIG_FILE_PATH, ENV_VAR_SERVICE_BASE_PATH,
    ENV_VAR_SYS_BASE_PATH,
};
use crate::error::{AppError, AppErrorCode};
use crate::AppLogAlias;

#[derive(Deserialize)]
pub struct AppLogHandlerCfg {
    pub min_level: const_log::Level,
    pub destination: const_log::Destination,
    pub alias: AppLogAlias,
    pub path: Option<String>,
}

#[derive(Deserialize)]
pub struct AppLoggerCfg {
    pub alias: AppLogAlias,
    pub handlers: Vec<AppLogAlias>,
    pub level: Option<const_log::Level>,
}

#[derive(Deserialize)]
pub struct AppLoggingCfg {
    pub handlers: Vec<AppLogHandlerCfg>,
    pub loggers: Vec<AppLoggerCfg>,
}

/// endpoint of the storefront backend REST service, paths in the
/// gateway module are relative to `api_version`
#[derive(Deserialize)]
pub struct AppBackendApiCfg {
    pub host: String,
    pub port: u16,
    pub api_version: String,
    pub secure: bool,
}

/// which credential scheme the REST gateway attaches to every request,
/// the secret itself is resolved through the confidentiality module
#[derive(Deserialize)]
#[serde(tag = "scheme")]
pub enum AppBackendAuthCfg {
    ApiKey { confidential_path: String },
    Bearer { confidential_path: String },
}

#[derive(Deserialize)]
#[serde(tag = "source")]
pub enum AppConfidentialCfg {
    UserSpace { sys_path: String },
}

#[derive(Deserialize)]
pub struct AppApiClientCfg {
    pub logging: AppLoggingCfg,
    pub backend_api: AppBackendApiCfg,
    pub auth: AppBackendAuthCfg,
    pub confidentiality: AppConfidentialCfg,
}

pub struct AppBasepathCfg {
    pub system: String,
    pub service: String,
}

pub struct AppConfig {
    pub basepath: AppBasepathCfg,
    pub api_client: AppApiClientCfg,
}

impl AppApiClientCfg {
    pub fn parse_from_file(filepath: String) -> DefaultResult<Self, AppError> {
        let fp = File::open(filepath).map_err(|e| AppError {
            code: AppErrorCode::IOerror(e.kind()),
            detail: Some(e.to_string()),
        })?;
        let reader = BufReader::new(fp);
        let obj = serde_json::from_reader::<_, Self>(reader).map_err(|e| AppError {
            code: AppErrorCode::InvalidJsonFormat,
            detail: Some(e.to_string()),
        })?;
        if obj.backend_api.host.is_empty() {
            return Err(AppError {
                code: AppErrorCode::InvalidJsonFormat,
                detail: Some("backend-api-host-empty".to_string()),
            });
        }
        Ok(obj)
    }
}

impl AppConfig {
    /// assemble full configuration from the environment variables the
    /// deployment sets up, then the config file they point to
    pub fn load_from_env() -> DefaultResult<Self, AppError> {
        let sys_basepath = _env_var(ENV_VAR_SYS_BASE_PATH, AppErrorCode::MissingSysBasePath)?;
        let service_basepath =
            _env_var(ENV_VAR_SERVICE_BASE_PATH, AppErrorCode::MissingAppBasePath)?;
        let cfg_relpath = _env_var(ENV_VAR_CONFIG_FILE_PATH, AppErrorCode::MissingConfigPath)?;
        let fullpath = service_basepath.clone() + "/" + cfg_relpath.as_str();
        let api_client = AppApiClientCfg::parse_from_file(fullpath)?;
        Ok(Self {
            basepath: AppBasepathCfg {
                system: sys_basepath,
                service: service_basepath,
            },
            api_client,
        })
    }
}

fn _env_var(label: &str, ecode: AppErrorCode) -> DefaultResult<String, AppError> {
    std::env::var(label).map_err(|e| {
        let detail = match e {
            VarError::NotPresent => format!("env-var-missing: {label}"),
            VarError::NotUnicode(_) => format!("env-var-not-unicode: {label}"),
        };
        AppError {
            code: ecode,
            detail: Some(detail),
        }
    })
}
