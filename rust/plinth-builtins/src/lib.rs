//! Plinth Builtins
//!
//! The closed set of builtin functions a Plinth program may call, what each
//! one means, what it costs, and the permanent numeric codes that identify
//! them in serialized programs.
//!
//! ```
//! use plinth_builtins::{decode_tag, encode_tag, invoke, DefaultFun};
//! use plinth_core::{EvaluationResult, Value};
//!
//! assert_eq!(encode_tag(DefaultFun::AddInteger), 0);
//! assert_eq!(decode_tag(0).unwrap(), DefaultFun::AddInteger);
//! let sum = invoke(DefaultFun::AddInteger, &[Value::from(2), Value::from(3)]).unwrap();
//! assert_eq!(sum, EvaluationResult::Success(Value::from(5)));
//! ```

pub mod budget;
pub mod codec;
pub mod cost;
pub mod env;
pub mod error;
pub mod fun;
pub mod meaning;
pub mod ops;
pub mod registry;

pub use budget::{BudgetMeter, BudgetMode};
pub use codec::{decode_tag, encode_tag, read_tag, write_tag};
pub use cost::{BuiltinCostModel, CostingFun, ExBudget, ExCpu};
pub use env::{DynamicEnv, TraceLog};
pub use error::{BudgetError, ChargeError, CostModelError, DecodeError};
pub use fun::DefaultFun;
pub use meaning::{BuiltinClass, BuiltinMeaning, Costing};
pub use registry::BuiltinRegistry;

use plinth_core::{CallError, EvaluationResult, ExMemory, Value};

/// The meaning of `fun` in the process-wide registry.
pub fn lookup(fun: DefaultFun) -> &'static BuiltinMeaning {
    BuiltinRegistry::global().lookup(fun)
}

/// Apply a static builtin. Dynamic builtins report
/// [`CallError::MissingEnvironment`]; use [`invoke_with_env`] for those.
pub fn invoke(fun: DefaultFun, args: &[Value]) -> Result<EvaluationResult<Value>, CallError> {
    lookup(fun).invoke(args)
}

/// Apply any builtin, threading `env` to the dynamic ones.
pub fn invoke_with_env(
    fun: DefaultFun,
    env: &mut DynamicEnv,
    args: &[Value],
) -> Result<EvaluationResult<Value>, CallError> {
    lookup(fun).invoke_with_env(env, args)
}

/// Price a call to `fun` from its argument sizes alone.
pub fn cost(
    model: &BuiltinCostModel,
    fun: DefaultFun,
    sizes: &[ExMemory],
) -> Result<ExBudget, CallError> {
    lookup(fun).cost(model, sizes)
}
