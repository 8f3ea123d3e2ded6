use std::result::Result as DefaultResult;

use hyper::header::{HeaderName, HeaderValue, AUTHORIZATION};

use crate::confidentiality::AbstractConfidentiality;
use crate::config::AppBackendAuthCfg;
use crate::constant::backend::API_KEY_HEADER;
use crate::error::{AppError, AppErrorCode};

/// credential the REST gateway attaches to every backend request, either
/// a static service API key or a bearer token obtained elsewhere, the
/// cart core is agnostic to which
pub enum AppBackendAuth {
    ApiKey(String),
    Bearer(String),
}

impl AppBackendAuth {
    pub fn try_build(
        cfg: &AppBackendAuthCfg,
        cfdntl: &dyn AbstractConfidentiality,
    ) -> DefaultResult<Self, AppError> {
        let out = match cfg {
            AppBackendAuthCfg::ApiKey { confidential_path } => {
                let secret = cfdntl.try_get_payload(confidential_path.as_str())?;
                Self::ApiKey(secret)
            }
            AppBackendAuthCfg::Bearer { confidential_path } => {
                let secret = cfdntl.try_get_payload(confidential_path.as_str())?;
                Self::Bearer(secret)
            }
        };
        Ok(out)
    }

    pub fn to_header(&self) -> DefaultResult<(HeaderName, HeaderValue), AppError> {
        let (name, rendered) = match self {
            Self::ApiKey(key) => (HeaderName::from_static(API_KEY_HEADER), key.clone()),
            Self::Bearer(tok) => (AUTHORIZATION, format!("Bearer {tok}")),
        };
        let value = HeaderValue::from_str(rendered.as_str()).map_err(|e| AppError {
            code: AppErrorCode::InvalidInput,
            detail: Some(e.to_string()),
        })?;
        Ok((name, value))
    }
}
