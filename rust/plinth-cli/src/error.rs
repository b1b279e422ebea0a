use plinth_builtins::{BudgetError, ChargeError, CostModelError, DecodeError};
use plinth_core::CallError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Call(#[from] CallError),
    #[error(transparent)]
    Budget(#[from] BudgetError),
    #[error("cost model `{path}`: {source}")]
    CostModel {
        path: PathBuf,
        #[source]
        source: CostModelError,
    },
    #[error("invalid literal `{input}`: {reason}")]
    Literal { input: String, reason: String },
    #[error("invalid config `{path}`: {reason}")]
    Config { path: PathBuf, reason: String },
    #[error("invalid size `{0}`: expected a non-negative integer")]
    InvalidSize(String),
}

impl From<ChargeError> for CliError {
    fn from(err: ChargeError) -> Self {
        match err {
            ChargeError::Call(e) => CliError::Call(e),
            ChargeError::Budget(e) => CliError::Budget(e),
        }
    }
}
