use crate::dedup::DEFAULT_MIN_KEY_LENGTH;
use crate::error::RollcallError;
use crate::fuzzy::FuzzyOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine tunables. Every field has a default, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanOptions {
    /// Email/phone values shorter than this never count as duplicates.
    pub min_key_length: usize,
    /// Drop sequence-number columns ("No", "순번", ...) from cleaned sheets.
    pub drop_sequence_columns: bool,
    pub fuzzy: FuzzyOptions,
}

impl Default for CleanOptions {
    fn default() -> Self {
        CleanOptions {
            min_key_length: DEFAULT_MIN_KEY_LENGTH,
            drop_sequence_columns: true,
            fuzzy: FuzzyOptions::default(),
        }
    }
}

/// Load options from a JSON file.
pub fn load_config(path: &Path) -> Result<CleanOptions, RollcallError> {
    let content = std::fs::read_to_string(path).map_err(|e| RollcallError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let options: CleanOptions =
        serde_json::from_str(&content).map_err(|e| RollcallError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&options)?;
    Ok(options)
}

/// Parse options from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<CleanOptions, RollcallError> {
    let options: CleanOptions = serde_json::from_str(json)?;
    validate_config(&options)?;
    Ok(options)
}

pub fn validate_config(options: &CleanOptions) -> Result<(), RollcallError> {
    if options.min_key_length == 0 {
        return Err(RollcallError::ConfigInvalid(
            "min_key_length must be at least 1".into(),
        ));
    }

    let t = options.fuzzy.threshold;
    if !(0.0..=1.0).contains(&t) {
        return Err(RollcallError::ConfigInvalid(format!(
            "fuzzy.threshold must be between 0.0 and 1.0, got {t}"
        )));
    }

    if options.fuzzy.max_distinct == 0 {
        return Err(RollcallError::ConfigInvalid(
            "fuzzy.max_distinct must be at least 1".into(),
        ));
    }

    Ok(())
}
