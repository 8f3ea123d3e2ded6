use std::boxed::Box;
use std::fs::File;
use std::io::BufReader;
use std::marker::{Send, Sync};
use std::result::Result as DefaultResult;

use serde_json::Value as JsnVal;

use crate::config::{AppConfidentialCfg, AppConfig};
use crate::error::{AppError, AppErrorCode};

pub trait AbstractConfidentiality: Send + Sync {
    // read-only interface to fetch user-defined private data
    fn try_get_payload(&self, id_: &str) -> DefaultResult<String, AppError>;
}

pub fn build_context(cfg: &AppConfig) -> DefaultResult<Box<dyn AbstractConfidentiality>, AppError> {
    match &cfg.api_client.confidentiality {
        AppConfidentialCfg::UserSpace { sys_path } => {
            let fullpath = cfg.basepath.system.clone() + "/" + sys_path.as_str();
            let obj = UserSpaceConfidentiality::build(fullpath);
            Ok(Box::new(obj))
        }
    }
}

/// secrets kept in a JSON file on local filesystem, `id_` is a
/// slash-separated path to the node holding the secret payload
pub struct UserSpaceConfidentiality {
    _fullpath: String,
}

impl UserSpaceConfidentiality {
    pub fn build(fullpath: String) -> Self {
        Self {
            _fullpath: fullpath,
        }
    }

    fn load_root(&self) -> DefaultResult<JsnVal, AppError> {
        let fp = File::open(self._fullpath.as_str()).map_err(|e| AppError {
            code: AppErrorCode::IOerror(e.kind()),
            detail: Some(e.to_string()),
        })?;
        let reader = BufReader::new(fp);
        serde_json::from_reader::<_, JsnVal>(reader).map_err(|e| AppError {
            code: AppErrorCode::InvalidJsonFormat,
            detail: Some(e.to_string()),
        })
    }
}

impl AbstractConfidentiality for UserSpaceConfidentiality {
    fn try_get_payload(&self, id_: &str) -> DefaultResult<String, AppError> {
        let root = self.load_root()?;
        let mut node = &root;
        for token in id_.split('/').filter(|t| !t.is_empty()) {
            node = node.get(token).ok_or(AppError {
                code: AppErrorCode::MissingSecret,
                detail: Some(format!("node-not-found: {token}")),
            })?;
        }
        let out = match node {
            JsnVal::String(s) => s.clone(),
            _ => node.to_string(),
        };
        Ok(out)
    }
}
