//! Execution costs.
//!
//! The *shape* of each builtin's cost (constant, linear, added sizes, ...)
//! is fixed in code; the coefficients come from a [`BuiltinCostModel`]
//! document that can be replaced without recompiling. Costs are computed
//! from argument sizes only, never by running the builtin.

mod model;
mod table;

pub use model::{
    CostingFun, ExBudget, ExCpu, ModelLinearSize, ModelOneArgument, ModelThreeArguments,
    ModelTwoArguments,
};
pub use table::BuiltinCostModel;
