//! Per-builtin calibration coefficients.

use super::model::{
    CostingFun, ModelLinearSize, ModelOneArgument, ModelThreeArguments, ModelTwoArguments,
};
use crate::error::CostModelError;
use crate::fun::DefaultFun;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::IntoEnumIterator;

type One = CostingFun<ModelOneArgument>;
type Two = CostingFun<ModelTwoArguments>;
type Three = CostingFun<ModelThreeArguments>;

/// Coefficients for every builtin, keyed by display name in JSON.
///
/// `charToString` and `append` have no calibrated coefficients yet. Their
/// entries are optional and price at zero while absent; see
/// [`BuiltinCostModel::unpriced`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuiltinCostModel {
    pub add_integer: Two,
    pub subtract_integer: Two,
    pub multiply_integer: Two,
    pub divide_integer: Two,
    pub quotient_integer: Two,
    pub remainder_integer: Two,
    pub mod_integer: Two,
    pub less_than_integer: Two,
    pub less_than_equals_integer: Two,
    pub greater_than_integer: Two,
    pub greater_than_equals_integer: Two,
    pub equals_integer: Two,
    pub concatenate: Two,
    pub take_byte_string: Two,
    pub drop_byte_string: Two,
    #[serde(rename = "sha2_256")]
    pub sha2_256: One,
    #[serde(rename = "sha3_256")]
    pub sha3_256: One,
    pub verify_signature: Three,
    pub equals_byte_string: Two,
    pub less_than_byte_string: Two,
    pub greater_than_byte_string: Two,
    pub if_then_else: Three,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_to_string: Option<One>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append: Option<Two>,
    pub trace: One,
}

impl BuiltinCostModel {
    pub fn from_json(json: &str) -> Result<Self, CostModelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, CostModelError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, CostModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builtins this model cannot price. They must be calibrated before the
    /// model is used to meter untrusted programs.
    pub fn unpriced(&self) -> Vec<DefaultFun> {
        DefaultFun::iter()
            .filter(|fun| !crate::lookup(*fun).costing().is_priced(self))
            .collect()
    }
}

const fn linear(intercept: u64, slope: u64) -> ModelLinearSize {
    ModelLinearSize { intercept, slope }
}

const fn two(cpu: ModelTwoArguments, memory: ModelTwoArguments) -> Two {
    CostingFun { cpu, memory }
}

const INTEGER_COMPARISON: Two = two(
    ModelTwoArguments::MinSize(linear(140, 6)),
    ModelTwoArguments::ConstantCost(1),
);

const BYTESTRING_COMPARISON: Two = two(
    ModelTwoArguments::MinSize(linear(110, 1)),
    ModelTwoArguments::ConstantCost(1),
);

const INTEGER_DIVISION: Two = two(
    ModelTwoArguments::MultipliedSizes(linear(420, 10)),
    ModelTwoArguments::LinearInX(linear(0, 1)),
);

const INTEGER_REMAINDER: Two = two(
    ModelTwoArguments::MultipliedSizes(linear(420, 10)),
    ModelTwoArguments::LinearInY(linear(0, 1)),
);

const INTEGER_ADDITIVE: Two = two(
    ModelTwoArguments::MaxSize(linear(205, 12)),
    ModelTwoArguments::MaxSize(linear(1, 1)),
);

const BYTESTRING_SLICE: Two = two(
    ModelTwoArguments::ConstantCost(150),
    ModelTwoArguments::LinearInY(linear(0, 1)),
);

/// The shipped calibration, mirrored in `data/builtin-cost-model.json`.
impl Default for BuiltinCostModel {
    fn default() -> Self {
        Self {
            add_integer: INTEGER_ADDITIVE,
            subtract_integer: INTEGER_ADDITIVE,
            multiply_integer: two(
                ModelTwoArguments::MultipliedSizes(linear(300, 8)),
                ModelTwoArguments::AddedSizes(linear(0, 1)),
            ),
            divide_integer: INTEGER_DIVISION,
            quotient_integer: INTEGER_DIVISION,
            remainder_integer: INTEGER_REMAINDER,
            mod_integer: INTEGER_REMAINDER,
            less_than_integer: INTEGER_COMPARISON,
            less_than_equals_integer: INTEGER_COMPARISON,
            greater_than_integer: INTEGER_COMPARISON,
            greater_than_equals_integer: INTEGER_COMPARISON,
            equals_integer: INTEGER_COMPARISON,
            concatenate: two(
                ModelTwoArguments::AddedSizes(linear(120, 2)),
                ModelTwoArguments::AddedSizes(linear(0, 1)),
            ),
            take_byte_string: BYTESTRING_SLICE,
            drop_byte_string: BYTESTRING_SLICE,
            sha2_256: CostingFun {
                cpu: ModelOneArgument::LinearCost(linear(2400, 30)),
                memory: ModelOneArgument::ConstantCost(32),
            },
            sha3_256: CostingFun {
                cpu: ModelOneArgument::LinearCost(linear(2900, 38)),
                memory: ModelOneArgument::ConstantCost(32),
            },
            verify_signature: CostingFun {
                cpu: ModelThreeArguments::LinearInY(linear(58000, 12)),
                memory: ModelThreeArguments::ConstantCost(1),
            },
            equals_byte_string: BYTESTRING_COMPARISON,
            less_than_byte_string: BYTESTRING_COMPARISON,
            greater_than_byte_string: BYTESTRING_COMPARISON,
            if_then_else: CostingFun {
                cpu: ModelThreeArguments::ConstantCost(80),
                memory: ModelThreeArguments::ConstantCost(1),
            },
            char_to_string: None,
            append: None,
            trace: CostingFun {
                cpu: ModelOneArgument::ConstantCost(100),
                memory: ModelOneArgument::ConstantCost(1),
            },
        }
    }
}
