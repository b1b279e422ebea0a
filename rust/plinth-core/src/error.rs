//! Caller contract violations.
//!
//! These never come out of a well-typed evaluator. They are values rather
//! than panics so a buggy caller gets a diagnostic instead of a crash.

use crate::universe::ValueType;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("builtin `{builtin}` expects {expected} argument(s), got {found}")]
    ArityMismatch {
        builtin: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("builtin `{builtin}` argument {position}: expected {expected}, found {found}")]
    TypeMismatch {
        builtin: &'static str,
        position: usize,
        expected: &'static str,
        found: ValueType,
    },
    #[error("builtin `{builtin}` needs a dynamic environment")]
    MissingEnvironment { builtin: &'static str },
}
