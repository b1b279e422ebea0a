//! Cost function shapes and the budget they produce.

use plinth_core::ExMemory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Compute cost in abstract CPU units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExCpu(pub u64);

impl Add for ExCpu {
    type Output = ExCpu;

    fn add(self, rhs: ExCpu) -> ExCpu {
        ExCpu(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for ExCpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The price of one builtin call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExBudget {
    pub cpu: ExCpu,
    pub memory: ExMemory,
}

impl ExBudget {
    pub const ZERO: ExBudget = ExBudget {
        cpu: ExCpu(0),
        memory: ExMemory(0),
    };

    pub fn new(cpu: u64, memory: u64) -> Self {
        Self {
            cpu: ExCpu(cpu),
            memory: ExMemory(memory),
        }
    }

    /// `true` if neither component of `self` exceeds the matching one in `limit`.
    pub fn fits_within(&self, limit: &ExBudget) -> bool {
        self.cpu <= limit.cpu && self.memory <= limit.memory
    }

    pub fn saturating_sub(self, rhs: ExBudget) -> ExBudget {
        ExBudget {
            cpu: ExCpu(self.cpu.0.saturating_sub(rhs.cpu.0)),
            memory: ExMemory(self.memory.0.saturating_sub(rhs.memory.0)),
        }
    }
}

impl Add for ExBudget {
    type Output = ExBudget;

    fn add(self, rhs: ExBudget) -> ExBudget {
        ExBudget {
            cpu: self.cpu + rhs.cpu,
            memory: self.memory + rhs.memory,
        }
    }
}

impl Sum for ExBudget {
    fn sum<I: Iterator<Item = ExBudget>>(iter: I) -> Self {
        iter.fold(ExBudget::ZERO, Add::add)
    }
}

impl fmt::Display for ExBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ cpu: {}, memory: {} }}", self.cpu, self.memory)
    }
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

/// `intercept + slope * size`, saturating.
///
/// Both coefficients are unsigned, so every shape built from this one is
/// monotone non-decreasing in each size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelLinearSize {
    pub intercept: u64,
    pub slope: u64,
}

impl ModelLinearSize {
    pub fn apply(&self, size: u64) -> u64 {
        self.slope.saturating_mul(size).saturating_add(self.intercept)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "arguments", rename_all = "snake_case")]
pub enum ModelOneArgument {
    ConstantCost(u64),
    LinearCost(ModelLinearSize),
}

impl ModelOneArgument {
    pub fn cost(&self, x: ExMemory) -> u64 {
        match self {
            ModelOneArgument::ConstantCost(c) => *c,
            ModelOneArgument::LinearCost(l) => l.apply(x.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "arguments", rename_all = "snake_case")]
pub enum ModelTwoArguments {
    ConstantCost(u64),
    AddedSizes(ModelLinearSize),
    MultipliedSizes(ModelLinearSize),
    MinSize(ModelLinearSize),
    MaxSize(ModelLinearSize),
    LinearInX(ModelLinearSize),
    LinearInY(ModelLinearSize),
}

impl ModelTwoArguments {
    pub fn cost(&self, x: ExMemory, y: ExMemory) -> u64 {
        let (x, y) = (x.0, y.0);
        match self {
            ModelTwoArguments::ConstantCost(c) => *c,
            ModelTwoArguments::AddedSizes(l) => l.apply(x.saturating_add(y)),
            ModelTwoArguments::MultipliedSizes(l) => l.apply(x.saturating_mul(y)),
            ModelTwoArguments::MinSize(l) => l.apply(x.min(y)),
            ModelTwoArguments::MaxSize(l) => l.apply(x.max(y)),
            ModelTwoArguments::LinearInX(l) => l.apply(x),
            ModelTwoArguments::LinearInY(l) => l.apply(y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "arguments", rename_all = "snake_case")]
pub enum ModelThreeArguments {
    ConstantCost(u64),
    AddedSizes(ModelLinearSize),
    LinearInX(ModelLinearSize),
    LinearInY(ModelLinearSize),
    LinearInZ(ModelLinearSize),
}

impl ModelThreeArguments {
    pub fn cost(&self, x: ExMemory, y: ExMemory, z: ExMemory) -> u64 {
        match self {
            ModelThreeArguments::ConstantCost(c) => *c,
            ModelThreeArguments::AddedSizes(l) => {
                l.apply(x.0.saturating_add(y.0).saturating_add(z.0))
            }
            ModelThreeArguments::LinearInX(l) => l.apply(x.0),
            ModelThreeArguments::LinearInY(l) => l.apply(y.0),
            ModelThreeArguments::LinearInZ(l) => l.apply(z.0),
        }
    }
}

/// A CPU model and a memory model of the same arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostingFun<M> {
    pub cpu: M,
    pub memory: M,
}

impl CostingFun<ModelOneArgument> {
    pub fn run(&self, x: ExMemory) -> ExBudget {
        ExBudget::new(self.cpu.cost(x), self.memory.cost(x))
    }
}

impl CostingFun<ModelTwoArguments> {
    pub fn run(&self, x: ExMemory, y: ExMemory) -> ExBudget {
        ExBudget::new(self.cpu.cost(x, y), self.memory.cost(x, y))
    }
}

impl CostingFun<ModelThreeArguments> {
    pub fn run(&self, x: ExMemory, y: ExMemory, z: ExMemory) -> ExBudget {
        ExBudget::new(self.cpu.cost(x, y, z), self.memory.cost(x, y, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const L: ModelLinearSize = ModelLinearSize {
        intercept: 10,
        slope: 3,
    };

    #[test]
    fn test_two_argument_shapes() {
        let (x, y) = (ExMemory(4), ExMemory(7));
        assert_eq!(ModelTwoArguments::ConstantCost(9).cost(x, y), 9);
        assert_eq!(ModelTwoArguments::AddedSizes(L).cost(x, y), 10 + 3 * 11);
        assert_eq!(ModelTwoArguments::MultipliedSizes(L).cost(x, y), 10 + 3 * 28);
        assert_eq!(ModelTwoArguments::MinSize(L).cost(x, y), 10 + 3 * 4);
        assert_eq!(ModelTwoArguments::MaxSize(L).cost(x, y), 10 + 3 * 7);
        assert_eq!(ModelTwoArguments::LinearInX(L).cost(x, y), 10 + 3 * 4);
        assert_eq!(ModelTwoArguments::LinearInY(L).cost(x, y), 10 + 3 * 7);
    }

    #[test]
    fn test_linear_saturates() {
        let steep = ModelLinearSize {
            intercept: u64::MAX,
            slope: u64::MAX,
        };
        assert_eq!(steep.apply(u64::MAX), u64::MAX);
        assert_eq!(
            ModelTwoArguments::MultipliedSizes(steep).cost(ExMemory(u64::MAX), ExMemory(2)),
            u64::MAX
        );
    }

    #[test]
    fn test_three_argument_shapes() {
        let (x, y, z) = (ExMemory(1), ExMemory(2), ExMemory(3));
        assert_eq!(ModelThreeArguments::AddedSizes(L).cost(x, y, z), 10 + 3 * 6);
        assert_eq!(ModelThreeArguments::LinearInY(L).cost(x, y, z), 16);
        assert_eq!(ModelThreeArguments::LinearInZ(L).cost(x, y, z), 19);
    }

    #[test]
    fn test_budget_arithmetic() {
        let a = ExBudget::new(5, 2);
        let b = ExBudget::new(1, 9);
        assert_eq!(a + b, ExBudget::new(6, 11));
        assert_eq!([a, b].into_iter().sum::<ExBudget>(), ExBudget::new(6, 11));
        assert_eq!(a.saturating_sub(b), ExBudget::new(4, 0));
        assert!(!b.fits_within(&a));
        assert!(ExBudget::new(5, 1).fits_within(&a));
        assert_eq!(a.to_string(), "{ cpu: 5, memory: 2 }");
    }

    #[test]
    fn test_model_json_shape() {
        let json = serde_json::to_value(ModelTwoArguments::MaxSize(L)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "max_size", "arguments": {"intercept": 10, "slope": 3}})
        );
        let constant: ModelOneArgument =
            serde_json::from_str(r#"{"type": "constant_cost", "arguments": 32}"#).unwrap();
        assert_eq!(constant, ModelOneArgument::ConstantCost(32));
    }
}
