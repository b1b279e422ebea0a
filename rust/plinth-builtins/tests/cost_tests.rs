//! Integration tests for pricing builtin calls.

use plinth_builtins::{
    cost, lookup, BudgetMeter, BuiltinCostModel, BuiltinRegistry, DefaultFun, DynamicEnv,
    ExBudget,
};
use plinth_core::{ExMemory, ExMemoryUsage, Value};
use strum::IntoEnumIterator;

// =============================================================================
// Helpers
// =============================================================================

const GRID: [u64; 7] = [0, 1, 2, 7, 64, 1_000, 1 << 20];

fn temp_model_path(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("plinth_test_cost_model");
    let _ = std::fs::create_dir_all(&dir);
    dir.join(name)
}

/// Every size vector of `arity` components drawn from [`GRID`].
fn size_grid(arity: usize) -> Vec<Vec<ExMemory>> {
    (0..arity).fold(vec![Vec::new()], |acc, _| {
        acc.into_iter()
            .flat_map(|prefix| {
                GRID.iter().map(move |&s| {
                    let mut next = prefix.clone();
                    next.push(ExMemory(s));
                    next
                })
            })
            .collect()
    })
}

// =============================================================================
// Monotonicity
// =============================================================================

#[test]
fn cost_is_monotone_in_every_argument() {
    let model = BuiltinCostModel::default();
    for meaning in BuiltinRegistry::global().iter() {
        let arity = meaning.arity();
        for sizes in size_grid(arity) {
            let base = meaning.cost(&model, &sizes).unwrap();
            for i in 0..arity {
                for &bigger in GRID.iter().filter(|&&g| g > sizes[i].0) {
                    let mut grown = sizes.clone();
                    grown[i] = ExMemory(bigger);
                    let more = meaning.cost(&model, &grown).unwrap();
                    assert!(
                        base.cpu <= more.cpu && base.memory <= more.memory,
                        "{}: {:?} -> {:?} lowered cost {} -> {}",
                        meaning.name(),
                        sizes,
                        grown,
                        base,
                        more
                    );
                }
            }
        }
    }
}

#[test]
fn cost_depends_only_on_sizes() {
    let model = BuiltinCostModel::default();
    let a = [Value::from(5), Value::from(9)];
    let b = [Value::from(-3), Value::from(1)];
    assert_eq!(
        lookup(DefaultFun::MultiplyInteger).cost_of_args(&model, &a),
        lookup(DefaultFun::MultiplyInteger).cost_of_args(&model, &b),
    );
}

// =============================================================================
// Pricing is independent of evaluation
// =============================================================================

#[test]
fn failing_call_is_still_priced() {
    let model = BuiltinCostModel::default();
    let args = [Value::from(10), Value::from(0)];
    let price = lookup(DefaultFun::DivideInteger)
        .cost_of_args(&model, &args)
        .unwrap();
    assert_eq!(price, ExBudget::new(420 + 10, 1));
}

#[test]
fn pricing_trace_emits_nothing() {
    let model = BuiltinCostModel::default();
    let (_env, log) = DynamicEnv::buffered();
    let price = cost(&model, DefaultFun::Trace, &[ExMemory(12)]).unwrap();
    assert_eq!(price, ExBudget::new(100, 1));
    assert!(log.is_empty());
}

#[test]
fn cost_of_args_uses_memory_oracle() {
    let model = BuiltinCostModel::default();
    let msg = Value::bytes(vec![0u8; 100]);
    let by_args = lookup(DefaultFun::Sha2_256)
        .cost_of_args(&model, &[msg.clone()])
        .unwrap();
    let by_sizes = cost(&model, DefaultFun::Sha2_256, &[msg.memory_usage()]).unwrap();
    assert_eq!(by_args, by_sizes);
    assert_eq!(by_args, ExBudget::new(2400 + 30 * 100, 32));
}

#[test]
fn wrong_number_of_sizes_is_an_error() {
    let model = BuiltinCostModel::default();
    for fun in DefaultFun::iter() {
        let arity = lookup(fun).arity();
        let sizes = vec![ExMemory(1); arity + 1];
        assert!(cost(&model, fun, &sizes).is_err(), "{}", fun);
    }
}

// =============================================================================
// Cost model files
// =============================================================================

#[test]
fn model_loads_from_disk() {
    let path = temp_model_path("model_loads_from_disk.json");
    let mut model = BuiltinCostModel::default();
    model.trace.cpu = plinth_builtins::cost::ModelOneArgument::ConstantCost(7);
    std::fs::write(&path, model.to_json_pretty().unwrap()).unwrap();

    let loaded = BuiltinCostModel::from_path(&path).unwrap();
    assert_eq!(loaded, model);
    assert_eq!(
        cost(&loaded, DefaultFun::Trace, &[ExMemory(1)]).unwrap(),
        ExBudget::new(7, 1)
    );
}

#[test]
fn missing_model_file_is_an_io_error() {
    let path = temp_model_path("does_not_exist.json");
    let _ = std::fs::remove_file(&path);
    assert!(matches!(
        BuiltinCostModel::from_path(&path),
        Err(plinth_builtins::CostModelError::Io(_))
    ));
}

#[test]
fn unpriced_builtins_are_listed_and_charge_zero() {
    let model = BuiltinCostModel::default();
    assert_eq!(
        model.unpriced(),
        vec![DefaultFun::CharToString, DefaultFun::Append]
    );
    assert_eq!(
        cost(&model, DefaultFun::Append, &[ExMemory(3), ExMemory(4)]).unwrap(),
        ExBudget::ZERO
    );
}

// =============================================================================
// Metering a sequence of calls
// =============================================================================

#[test]
fn meter_sums_a_program() {
    let model = BuiltinCostModel::default();
    let mut meter = BudgetMeter::counting();
    let calls: [(DefaultFun, Vec<Value>); 3] = [
        (DefaultFun::AddInteger, vec![Value::from(1), Value::from(2)]),
        (
            DefaultFun::IfThenElse,
            vec![Value::Bool(true), Value::Unit, Value::Unit],
        ),
        (DefaultFun::Trace, vec![Value::string("done")]),
    ];
    let mut expected = ExBudget::ZERO;
    for (fun, args) in &calls {
        expected = expected + meter.charge(&model, *fun, args).unwrap();
    }
    assert_eq!(meter.spent(), expected);
    assert_eq!(expected, ExBudget::new(217 + 80 + 100, 2 + 1 + 1));
}

#[test]
fn restricting_meter_stops_before_overrun() {
    let model = BuiltinCostModel::default();
    let mut meter = BudgetMeter::restricting(ExBudget::new(250, 100));
    let args = [Value::Bool(false), Value::Unit, Value::Unit];
    assert!(meter.charge(&model, DefaultFun::IfThenElse, &args).is_ok());
    assert!(meter.charge(&model, DefaultFun::IfThenElse, &args).is_ok());
    assert!(meter.charge(&model, DefaultFun::IfThenElse, &args).is_ok());
    assert!(meter.charge(&model, DefaultFun::IfThenElse, &args).is_err());
    assert_eq!(meter.spent(), ExBudget::new(240, 3));
    assert_eq!(meter.remaining(), Some(ExBudget::new(10, 97)));
}
