//! Budget accounting for a sequence of builtin calls.
//!
//! A [`BudgetMeter`] either just counts what has been spent
//! ([`BudgetMode::Counting`]) or also enforces a limit
//! ([`BudgetMode::Restricting`]). A charge that would overrun the limit is
//! refused and leaves the meter untouched.
//!
//! ```rust
//! use plinth_builtins::{BudgetMeter, DefaultFun, ExBudget};
//!
//! let mut meter = BudgetMeter::restricting(ExBudget::new(100, 10));
//! assert!(meter.spend(DefaultFun::IfThenElse, ExBudget::new(80, 1)).is_ok());
//! assert!(meter.spend(DefaultFun::IfThenElse, ExBudget::new(80, 1)).is_err());
//! assert_eq!(meter.spent(), ExBudget::new(80, 1));
//! ```

use crate::cost::{BuiltinCostModel, ExBudget};
use crate::error::{BudgetError, ChargeError};
use crate::fun::DefaultFun;
use plinth_core::Value;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetMode {
    /// Accumulate without a limit.
    Counting,
    /// Refuse any charge that would take the total past the limit.
    Restricting(ExBudget),
}

#[derive(Debug, Clone)]
pub struct BudgetMeter {
    mode: BudgetMode,
    spent: ExBudget,
    /// Spend broken down per builtin.
    tally: BTreeMap<DefaultFun, ExBudget>,
}

impl BudgetMeter {
    pub fn new(mode: BudgetMode) -> Self {
        Self {
            mode,
            spent: ExBudget::ZERO,
            tally: BTreeMap::new(),
        }
    }

    pub fn counting() -> Self {
        Self::new(BudgetMode::Counting)
    }

    pub fn restricting(limit: ExBudget) -> Self {
        Self::new(BudgetMode::Restricting(limit))
    }

    pub fn mode(&self) -> BudgetMode {
        self.mode
    }

    /// Record `cost` against `fun`.
    pub fn spend(&mut self, fun: DefaultFun, cost: ExBudget) -> Result<(), BudgetError> {
        let total = self.spent + cost;
        if let BudgetMode::Restricting(limit) = self.mode {
            if !total.fits_within(&limit) {
                debug!(builtin = fun.display_name(), %cost, spent = %self.spent, "budget exhausted");
                return Err(BudgetError::Exhausted {
                    builtin: fun.display_name(),
                    requested: cost,
                    remaining: limit.saturating_sub(self.spent),
                });
            }
        }
        self.spent = total;
        let entry = self.tally.entry(fun).or_insert(ExBudget::ZERO);
        *entry = *entry + cost;
        Ok(())
    }

    /// Price a call to `fun` on `args` under `model` and spend it.
    ///
    /// Returns the price charged. Pricing happens before, and independently
    /// of, any evaluation of the call.
    pub fn charge(
        &mut self,
        model: &BuiltinCostModel,
        fun: DefaultFun,
        args: &[Value],
    ) -> Result<ExBudget, ChargeError> {
        let cost = crate::lookup(fun).cost_of_args(model, args)?;
        self.spend(fun, cost)?;
        Ok(cost)
    }

    pub fn spent(&self) -> ExBudget {
        self.spent
    }

    /// What is left under the limit, or `None` when only counting.
    pub fn remaining(&self) -> Option<ExBudget> {
        match self.mode {
            BudgetMode::Counting => None,
            BudgetMode::Restricting(limit) => Some(limit.saturating_sub(self.spent)),
        }
    }

    pub fn spent_on(&self, fun: DefaultFun) -> ExBudget {
        self.tally.get(&fun).copied().unwrap_or(ExBudget::ZERO)
    }

    /// Per-builtin spend, in declaration order of the builtins.
    pub fn tally(&self) -> impl Iterator<Item = (DefaultFun, ExBudget)> + '_ {
        self.tally.iter().map(|(fun, cost)| (*fun, *cost))
    }

    /// Clear everything spent, keeping the mode.
    pub fn reset(&mut self) {
        self.spent = ExBudget::ZERO;
        self.tally.clear();
    }
}

impl Default for BudgetMeter {
    fn default() -> Self {
        Self::counting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plinth_core::CallError;

    #[test]
    fn test_counting_never_refuses() {
        let mut meter = BudgetMeter::counting();
        for _ in 0..3 {
            meter.spend(DefaultFun::Trace, ExBudget::new(u64::MAX, 1)).unwrap();
        }
        assert_eq!(meter.spent(), ExBudget::new(u64::MAX, 3));
        assert_eq!(meter.remaining(), None);
    }

    #[test]
    fn test_refused_charge_leaves_meter_unchanged() {
        let mut meter = BudgetMeter::restricting(ExBudget::new(10, 10));
        meter.spend(DefaultFun::AddInteger, ExBudget::new(6, 1)).unwrap();
        let err = meter
            .spend(DefaultFun::MultiplyInteger, ExBudget::new(6, 1))
            .unwrap_err();
        assert_eq!(
            err,
            BudgetError::Exhausted {
                builtin: "multiplyInteger",
                requested: ExBudget::new(6, 1),
                remaining: ExBudget::new(4, 9),
            }
        );
        assert_eq!(meter.spent(), ExBudget::new(6, 1));
        assert_eq!(meter.spent_on(DefaultFun::MultiplyInteger), ExBudget::ZERO);
    }

    #[test]
    fn test_exact_fit_is_allowed() {
        let mut meter = BudgetMeter::restricting(ExBudget::new(10, 2));
        meter.spend(DefaultFun::EqInteger, ExBudget::new(10, 2)).unwrap();
        assert_eq!(meter.remaining(), Some(ExBudget::ZERO));
    }

    #[test]
    fn test_memory_alone_can_exhaust() {
        let mut meter = BudgetMeter::restricting(ExBudget::new(1_000, 1));
        assert!(meter.spend(DefaultFun::Sha2_256, ExBudget::new(1, 32)).is_err());
    }

    #[test]
    fn test_tally_and_reset() {
        let mut meter = BudgetMeter::counting();
        meter.spend(DefaultFun::Trace, ExBudget::new(1, 1)).unwrap();
        meter.spend(DefaultFun::AddInteger, ExBudget::new(2, 2)).unwrap();
        meter.spend(DefaultFun::Trace, ExBudget::new(1, 1)).unwrap();
        let tally: Vec<_> = meter.tally().collect();
        assert_eq!(
            tally,
            vec![
                (DefaultFun::AddInteger, ExBudget::new(2, 2)),
                (DefaultFun::Trace, ExBudget::new(2, 2)),
            ]
        );
        meter.reset();
        assert_eq!(meter.spent(), ExBudget::ZERO);
        assert_eq!(meter.tally().count(), 0);
    }

    #[test]
    fn test_charge_prices_from_model() {
        let model = BuiltinCostModel::default();
        let mut meter = BudgetMeter::counting();
        let args = [Value::from(1), Value::from(2)];
        let charged = meter.charge(&model, DefaultFun::AddInteger, &args).unwrap();
        assert_eq!(charged, ExBudget::new(205 + 12, 1 + 1));
        assert_eq!(meter.spent(), charged);
    }

    #[test]
    fn test_charge_reports_arity() {
        let model = BuiltinCostModel::default();
        let mut meter = BudgetMeter::counting();
        assert!(matches!(
            meter.charge(&model, DefaultFun::AddInteger, &[Value::from(1)]),
            Err(ChargeError::Call(CallError::ArityMismatch { .. }))
        ));
    }
}
