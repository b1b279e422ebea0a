//! Integration tests for the `plinth` subcommands.

use plinth_builtins::{BuiltinCostModel, ExBudget};
use plinth_cli::commands::{self, EvalReport};
use plinth_cli::{CliError, PlinthConfig};
use plinth_core::{EvaluationResult, Value};

// =============================================================================
// Helper
// =============================================================================

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("plinth_test_cli").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn eval(name: &str, args: &[&str]) -> Result<EvalReport, CliError> {
    commands::eval(&BuiltinCostModel::default(), name, args, None)
}

// =============================================================================
// encode / decode
// =============================================================================

#[test]
fn encode_prints_code_and_varint() {
    assert_eq!(commands::encode("addInteger").unwrap(), "0\t#00");
    assert_eq!(commands::encode("quotientInteger").unwrap(), "17\t#11");
}

#[test]
fn decode_rejects_unknown_code() {
    let err = commands::decode("999").unwrap_err();
    assert_eq!(err.to_string(), "unrecognized operation tag: 999");
    assert!(commands::decode("#e707").is_err());
    assert!(commands::decode("seven").is_err());
}

#[test]
fn decode_rejects_trailing_and_padded_bytes() {
    assert_eq!(commands::decode("#11").unwrap(), "quotientInteger");
    assert!(matches!(
        commands::decode("#1100"),
        Err(CliError::Literal { .. })
    ));
    assert!(matches!(commands::decode("#8000"), Err(CliError::Decode(_))));
}

#[test]
fn unknown_name_is_reported() {
    assert!(matches!(
        commands::encode("addInt"),
        Err(CliError::Decode(_))
    ));
}

// =============================================================================
// cost
// =============================================================================

#[test]
fn cost_prints_budget() {
    let model = BuiltinCostModel::default();
    assert_eq!(
        commands::cost(&model, "ifThenElse", &["1", "1", "1"]).unwrap(),
        "{ cpu: 80, memory: 1 }"
    );
}

#[test]
fn cost_checks_sizes() {
    let model = BuiltinCostModel::default();
    assert!(matches!(
        commands::cost(&model, "addInteger", &["1", "-2"]),
        Err(CliError::InvalidSize(_))
    ));
    assert!(matches!(
        commands::cost(&model, "addInteger", &["1"]),
        Err(CliError::Call(_))
    ));
}

// =============================================================================
// eval
// =============================================================================

#[test]
fn eval_reports_result_and_spend() {
    let report = eval("addInteger", &["2", "3"]).unwrap();
    assert_eq!(report.result, EvaluationResult::Success(Value::from(5)));
    assert_eq!(report.spent, ExBudget::new(217, 2));
    assert_eq!(
        report.render(),
        "result: 5\nspent: { cpu: 217, memory: 2 }\n"
    );
}

#[test]
fn eval_failure_is_not_an_error() {
    let report = eval("divideInteger", &["1", "0"]).unwrap();
    assert_eq!(report.result, EvaluationResult::Failure);
    assert!(report.render().starts_with("result: failure\n"));
}

#[test]
fn eval_collects_trace() {
    let report = eval("trace", &["\"checkpoint\""]).unwrap();
    assert_eq!(report.trace, vec!["checkpoint"]);
    assert!(report.render().starts_with("trace: checkpoint\nresult: \"checkpoint\"\n"));
}

#[test]
fn eval_respects_budget_limit() {
    let model = BuiltinCostModel::default();
    let err = commands::eval(
        &model,
        "sha2_256",
        &["#00"],
        Some(ExBudget::new(1_000, 1_000)),
    )
    .unwrap_err();
    assert!(matches!(err, CliError::Budget(_)));
}

#[test]
fn eval_type_errors_surface() {
    assert!(matches!(
        eval("addInteger", &["1", "true"]),
        Err(CliError::Call(_))
    ));
    assert!(matches!(
        eval("addInteger", &["1", "nope"]),
        Err(CliError::Literal { .. })
    ));
}

// =============================================================================
// unpriced / config
// =============================================================================

#[test]
fn unpriced_lists_placeholders() {
    assert_eq!(
        commands::unpriced(&BuiltinCostModel::default()),
        "charToString\nappend\n"
    );
}

#[test]
fn config_found_in_ancestor() {
    let root = temp_dir("config_found_in_ancestor");
    std::fs::write(
        root.join("plinth.toml"),
        "cost_model = \"model.json\"\n[budget]\nmemory = 64\n",
    )
    .unwrap();
    let nested = root.join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();

    let (path, cfg) = PlinthConfig::find_from(&nested).unwrap().unwrap();
    assert_eq!(path, root.join("plinth.toml"));
    assert_eq!(cfg.budget.memory, Some(64));
    assert_eq!(cfg.cost_model_path(&path), Some(root.join("model.json")));
}

#[test]
fn cost_model_from_config_dir_is_used() {
    let root = temp_dir("cost_model_from_config_dir_is_used");
    let mut model = BuiltinCostModel::default();
    model.append = model.concatenate.into();
    std::fs::write(root.join("model.json"), model.to_json_pretty().unwrap()).unwrap();
    let path = root.join("model.json");
    let loaded = commands::load_cost_model(Some(path.as_path())).unwrap();
    assert_eq!(commands::unpriced(&loaded), "charToString\n");
}

#[test]
fn broken_config_is_an_error() {
    let root = temp_dir("broken_config_is_an_error");
    std::fs::write(root.join("plinth.toml"), "log = [").unwrap();
    assert!(matches!(
        PlinthConfig::find_from(&root),
        Err(CliError::Config { .. })
    ));
}
