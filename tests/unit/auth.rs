use std::fs::File;
use std::io::Write;
use std::result::Result as DefaultResult;

use storefront::auth::AppBackendAuth;
use storefront::config::AppBackendAuthCfg;
use storefront::confidentiality::{AbstractConfidentiality, UserSpaceConfidentiality};
use storefront::error::{AppError, AppErrorCode};

struct MockConfidential {
    payload: &'static str,
}

impl AbstractConfidentiality for MockConfidential {
    fn try_get_payload(&self, _id: &str) -> DefaultResult<String, AppError> {
        Ok(self.payload.to_string())
    }
}

fn ut_auth_cfg(serial: &str) -> AppBackendAuthCfg {
    serde_json::from_str::<AppBackendAuthCfg>(serial).unwrap()
}

#[test]
fn api_key_scheme_renders_custom_header() {
    let cfg = ut_auth_cfg(r#"{"scheme":"ApiKey", "confidential_path":"backend/api_key"}"#);
    let cfdntl = MockConfidential {
        payload: "open-sesame-8964",
    };
    let auth = AppBackendAuth::try_build(&cfg, &cfdntl).unwrap();
    let (name, value) = auth.to_header().unwrap();
    assert_eq!(name.as_str(), "x-api-key");
    assert_eq!(value.to_str().unwrap(), "open-sesame-8964");
}

#[test]
fn bearer_scheme_renders_authorization_header() {
    let cfg = ut_auth_cfg(r#"{"scheme":"Bearer", "confidential_path":"backend/token"}"#);
    let cfdntl = MockConfidential {
        payload: "tok.abc.def",
    };
    let auth = AppBackendAuth::try_build(&cfg, &cfdntl).unwrap();
    let (name, value) = auth.to_header().unwrap();
    assert_eq!(name.as_str(), "authorization");
    assert_eq!(value.to_str().unwrap(), "Bearer tok.abc.def");
}

#[test]
fn userspace_secret_lookup() {
    let filepath = std::env::temp_dir().join("storefront-ut-secret.json");
    {
        let mut fp = File::create(&filepath).unwrap();
        fp.write_all(br#"{"backend": {"api_key": "k-20240917", "retries": 3}}"#)
            .unwrap();
    }
    let cfdntl = UserSpaceConfidentiality::build(filepath.to_str().unwrap().to_string());
    let out = cfdntl.try_get_payload("backend/api_key").unwrap();
    assert_eq!(out.as_str(), "k-20240917");
    // non-string nodes come back serialized
    let out = cfdntl.try_get_payload("backend/retries").unwrap();
    assert_eq!(out.as_str(), "3");
    let result = cfdntl.try_get_payload("backend/nonexist");
    assert!(matches!(
        result,
        Err(AppError {
            code: AppErrorCode::MissingSecret,
            ..
        })
    ));
    let _discard = std::fs::remove_file(&filepath);
}
