use std::fmt::{Debug, Display};

#[derive(Debug, Clone, PartialEq)]
pub enum AppErrorCode {
    Unknown,
    NotImplemented,
    MissingSysBasePath,
    MissingAppBasePath,
    MissingConfigPath,
    MissingConfig,
    MissingSecret,
    InvalidJsonFormat,
    InvalidInput, // for caller-side input error, reject before any remote call
    EmptyInputData,
    CartNotCreated,
    CartLineNotExist,
    ExceedingMaxLimit,
    CryptoFailure,
    HttpHandshakeFailure,
    RemoteSrvFailure,
    DataCorruption,
    AcquireLockFailure,
    IOerror(std::io::ErrorKind),
} // end of AppErrorCode

#[derive(Debug, Clone)]
pub struct AppError {
    pub code: AppErrorCode,
    pub detail: Option<String>,
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let default_detail = "none";
        let dp = if let Some(s) = &self.detail {
            s.as_str()
        } else {
            default_detail
        };
        write!(f, "code:{:?}, detail:{}", self.code, dp)
    }
}

impl From<(AppErrorCode, String)> for AppError {
    fn from(value: (AppErrorCode, String)) -> Self {
        AppError {
            code: value.0,
            detail: Some(value.1),
        }
    }
}
