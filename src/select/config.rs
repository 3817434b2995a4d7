//! Module options file parsing.

use std::fs;
use std::path::Path;

use crate::select::error::SelectError;
use crate::select::options::{OptionValue, Options};

/// Load default options from a TOML file with an `[options]` table.
pub fn load_default_options(path: &Path) -> Result<Options, SelectError> {
    let content = fs::read_to_string(path)
        .map_err(|e| SelectError::Config(format!("failed to read options file: {}", e)))?;
    parse_default_options(&content)
}

/// Parse default options from a TOML string.
///
/// Expected format:
/// ```toml
/// [options]
/// accelerated = true
/// precision = "f64"
/// batch = 32
/// ```
///
/// Only scalar values (boolean, integer, float, string) are accepted;
/// a missing `[options]` table parses as empty options.
pub fn parse_default_options(content: &str) -> Result<Options, SelectError> {
    let root: toml::Value = content
        .parse()
        .map_err(|e| SelectError::Config(format!("malformed options file: {}", e)))?;

    let table = match root.get("options") {
        Some(toml::Value::Table(table)) => table,
        Some(_) => {
            return Err(SelectError::Config(
                "'options' must be a table".to_string(),
            ))
        }
        None => return Ok(Options::new()),
    };

    let mut options = Options::new();
    for (key, value) in table {
        options.set(key.clone(), scalar(key, value)?);
    }
    Ok(options)
}

fn scalar(key: &str, value: &toml::Value) -> Result<OptionValue, SelectError> {
    match value {
        toml::Value::Boolean(b) => Ok(OptionValue::Boolean(*b)),
        toml::Value::Integer(i) => Ok(OptionValue::Integer(*i)),
        toml::Value::Float(f) => Ok(OptionValue::Float(*f)),
        toml::Value::String(s) => Ok(OptionValue::Str(s.clone())),
        other => Err(SelectError::Config(format!(
            "option '{}' has a non-scalar value ({})",
            key,
            other.type_str()
        ))),
    }
}
