//! Error types for the codec, the cost model loader and the budget meter.

use crate::cost::ExBudget;
use plinth_core::CallError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unrecognized operation tag: {0}")]
    UnknownTag(u64),
    #[error("unknown builtin name: `{0}`")]
    UnknownName(String),
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("malformed LEB128 varint")]
    InvalidVarint,
}

#[derive(Debug, Error)]
pub enum CostModelError {
    #[error("failed to parse cost model: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read cost model: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    #[error("budget exhausted by `{builtin}`: requested {requested}, remaining {remaining}")]
    Exhausted {
        builtin: &'static str,
        requested: ExBudget,
        remaining: ExBudget,
    },
}

/// Why [`crate::BudgetMeter::charge`] refused a call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChargeError {
    #[error(transparent)]
    Call(#[from] CallError),
    #[error(transparent)]
    Budget(#[from] BudgetError),
}
