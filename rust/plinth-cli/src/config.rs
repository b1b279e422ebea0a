//! Configuration file parsing for `plinth.toml`.
//!
//! Searches the current directory then its ancestors. Every setting is
//! optional and command-line flags take precedence.

use crate::error::CliError;
use plinth_builtins::ExBudget;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "plinth.toml";

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PlinthConfig {
    /// Cost model JSON, relative to the config file.
    #[serde(default)]
    pub cost_model: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `plinth=debug`.
    #[serde(default)]
    pub log: Option<String>,
    #[serde(default)]
    pub budget: BudgetSection,
}

/// Limits for `plinth eval`. A missing component is unlimited.
#[derive(Debug, Deserialize, Serialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BudgetSection {
    pub cpu: Option<u64>,
    pub memory: Option<u64>,
}

impl BudgetSection {
    /// `None` when neither component is limited.
    pub fn limit(&self) -> Option<ExBudget> {
        if self.cpu.is_none() && self.memory.is_none() {
            return None;
        }
        Some(ExBudget::new(
            self.cpu.unwrap_or(u64::MAX),
            self.memory.unwrap_or(u64::MAX),
        ))
    }

    /// Components set in `overrides` win.
    pub fn merged(self, overrides: BudgetSection) -> BudgetSection {
        BudgetSection {
            cpu: overrides.cpu.or(self.cpu),
            memory: overrides.memory.or(self.memory),
        }
    }
}

impl PlinthConfig {
    /// Find `plinth.toml` in the current directory or an ancestor.
    ///
    /// Returns the file's path with the parsed config, or `None` when no file
    /// exists. A file that exists but does not parse is an error.
    pub fn load_with_path() -> Result<Option<(PathBuf, Self)>, CliError> {
        match std::env::current_dir() {
            Ok(dir) => Self::find_from(&dir),
            Err(_) => Ok(None),
        }
    }

    pub fn find_from(start: &Path) -> Result<Option<(PathBuf, Self)>, CliError> {
        let mut dir = start.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let cfg = Self::load_from(&candidate)?;
                return Ok(Some((candidate, cfg)));
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// `cost_model` resolved against the directory holding the config file.
    pub fn cost_model_path(&self, config_path: &Path) -> Option<PathBuf> {
        let model = self.cost_model.as_ref()?;
        match config_path.parent() {
            Some(dir) if model.is_relative() => Some(dir.join(model)),
            _ => Some(model.clone()),
        }
    }

    pub fn default_template() -> &'static str {
        r#"# Plinth configuration

# Cost model coefficients (JSON). Defaults to the built-in calibration.
# cost_model = "builtin-cost-model.json"

# Log filter, overridden by PLINTH_LOG.
# log = "plinth=info"

# Budget enforced by `plinth eval`. Omitted components are unlimited.
[budget]
# cpu = 1000000
# memory = 10000
"#
    }
}
