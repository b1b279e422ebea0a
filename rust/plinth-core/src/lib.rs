//! Plinth Core
//!
//! The value universe shared by every builtin: the primitive values a program
//! can hand to a builtin, the failure-without-exception result type used by
//! partial builtins, and the memory-size oracle that feeds the cost model.

pub mod error;
pub mod memory;
pub mod result;
pub mod universe;

pub use error::CallError;
pub use memory::{ExMemory, ExMemoryUsage};
pub use result::{guard_second_arg, non_zero_arg, EvaluationResult, IntoEvaluation};
pub use universe::{KnownType, Value, ValueType};
