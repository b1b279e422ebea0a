//! The `plinth` subcommands.

use crate::error::CliError;
use crate::literal::parse_values;
use plinth_builtins::{
    decode_tag, encode_tag, lookup, read_tag, write_tag, BudgetMeter, BuiltinClass,
    BuiltinCostModel, BuiltinRegistry, DefaultFun, DynamicEnv, ExBudget,
};
use plinth_core::{EvaluationResult, ExMemory, Value};
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, info};

/// The cost model at `path`, or the built-in calibration.
pub fn load_cost_model(path: Option<&Path>) -> Result<BuiltinCostModel, CliError> {
    let Some(path) = path else {
        return Ok(BuiltinCostModel::default());
    };
    info!(path = %path.display(), "loading cost model");
    BuiltinCostModel::from_path(path).map_err(|source| CliError::CostModel {
        path: path.to_path_buf(),
        source,
    })
}

/// One row per builtin: code, name, class and signature.
pub fn list() -> String {
    let mut out = String::new();
    for meaning in BuiltinRegistry::global().iter() {
        let class = match meaning.class() {
            BuiltinClass::Static => "static",
            BuiltinClass::Dynamic => "dynamic",
        };
        let _ = writeln!(
            out,
            "{:>3}  {:<26}{:<9}{}",
            encode_tag(meaning.fun()),
            meaning.name(),
            class,
            meaning.signature()
        );
    }
    out
}

/// The stable code of a builtin and its varint bytes.
pub fn encode(name: &str) -> Result<String, CliError> {
    let fun: DefaultFun = name.parse()?;
    let mut bytes = Vec::new();
    write_tag(&mut bytes, fun);
    Ok(format!("{}\t#{}", encode_tag(fun), hex::encode(bytes)))
}

/// Name the builtin behind a decimal code or a `#hex` varint.
pub fn decode(code: &str) -> Result<String, CliError> {
    let fun = match code.strip_prefix('#') {
        Some(digits) => {
            let bytes = hex::decode(digits).map_err(|e| CliError::Literal {
                input: code.to_string(),
                reason: e.to_string(),
            })?;
            let mut offset = 0;
            let fun = read_tag(&bytes, &mut offset)?;
            if offset != bytes.len() {
                return Err(CliError::Literal {
                    input: code.to_string(),
                    reason: format!("{} trailing byte(s) after the code", bytes.len() - offset),
                });
            }
            fun
        }
        None => {
            let n: u64 = code.parse().map_err(|_| CliError::Literal {
                input: code.to_string(),
                reason: "expected a code or #hex bytes".to_string(),
            })?;
            decode_tag(n)?
        }
    };
    Ok(fun.display_name().to_string())
}

pub fn cost<S: AsRef<str>>(
    model: &BuiltinCostModel,
    name: &str,
    sizes: &[S],
) -> Result<String, CliError> {
    let fun: DefaultFun = name.parse()?;
    let sizes = sizes
        .iter()
        .map(|s| {
            let s = s.as_ref();
            s.parse::<u64>()
                .map(ExMemory)
                .map_err(|_| CliError::InvalidSize(s.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let budget = lookup(fun).cost(model, &sizes)?;
    Ok(budget.to_string())
}

/// What `plinth eval` observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalReport {
    pub result: EvaluationResult<Value>,
    pub trace: Vec<String>,
    pub spent: ExBudget,
}

impl EvalReport {
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.trace {
            let _ = writeln!(out, "trace: {}", line);
        }
        match &self.result {
            EvaluationResult::Success(v) => {
                let _ = writeln!(out, "result: {}", v);
            }
            EvaluationResult::Failure => out.push_str("result: failure\n"),
        }
        let _ = writeln!(out, "spent: {}", self.spent);
        out
    }
}

/// Charge, then apply `name` to the parsed literals.
///
/// With a `limit` the call is refused before evaluation if its price does
/// not fit.
pub fn eval<S: AsRef<str>>(
    model: &BuiltinCostModel,
    name: &str,
    args: &[S],
    limit: Option<ExBudget>,
) -> Result<EvalReport, CliError> {
    let fun: DefaultFun = name.parse()?;
    let args = parse_values(args)?;

    let mut meter = match limit {
        Some(limit) => BudgetMeter::restricting(limit),
        None => BudgetMeter::counting(),
    };
    meter.charge(model, fun, &args)?;

    let (buffer, log) = DynamicEnv::buffered();
    let mut env = buffer.combine(DynamicEnv::tracing());
    let result = lookup(fun).invoke_with_env(&mut env, &args)?;
    debug!(builtin = %fun, success = result.is_success(), "evaluated");

    Ok(EvalReport {
        result,
        trace: log.messages(),
        spent: meter.spent(),
    })
}

/// Builtins the model cannot price yet.
pub fn unpriced(model: &BuiltinCostModel) -> String {
    let missing = model.unpriced();
    if missing.is_empty() {
        return "every builtin is priced\n".to_string();
    }
    missing
        .iter()
        .map(|fun| format!("{}\n", fun))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_has_every_builtin() {
        let listing = list();
        assert_eq!(listing.lines().count(), 25);
        assert!(listing.contains("verifySignature"));
        assert!(listing
            .lines()
            .any(|l| l.contains("trace") && l.contains("dynamic")));
    }

    #[test]
    fn test_encode_decode() {
        assert_eq!(encode("trace").unwrap(), "24\t#18");
        assert_eq!(decode("24").unwrap(), "trace");
        assert_eq!(decode("#18").unwrap(), "trace");
    }
}
