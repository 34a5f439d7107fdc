//! Built-in name table, loaded from TOML with the same OnceLock pattern as
//! the transliteration table.
//!
//! - `init_custom(toml_content)` replaces the table before first `builtin()` call
//! - `builtin()` returns the sorted `&'static Mapping` (lazy-init singleton)
//! - The default table is embedded via `include_str!("default_names.toml")`

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::mapping::Mapping;

pub const DEFAULT_NAMES_TOML: &str = include_str!("default_names.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

#[derive(Deserialize)]
struct NamesConfig {
    names: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NamesConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[names] table is empty")]
    Empty,
    #[error("empty dialect name")]
    EmptyKey,
    #[error("empty value for name: {0}")]
    EmptyValue(String),
    #[error("names {first} and {second} both map to {value}")]
    DuplicateValue {
        value: String,
        first: String,
        second: String,
    },
    #[error("name table already initialized")]
    AlreadyInitialized,
}

/// Set custom TOML before first `builtin()` call.
pub fn init_custom(toml_content: String) -> Result<(), NamesConfigError> {
    parse_names_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| NamesConfigError::AlreadyInitialized)
}

/// Get or initialize the built-in table, sorted by descending key length.
pub fn builtin() -> &'static Mapping {
    static INSTANCE: OnceLock<Mapping> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_NAMES_TOML);
        parse_names_toml(toml_str).expect("names TOML must be valid")
    })
}

/// Returns the embedded default names TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_NAMES_TOML
}

/// Parse a `[names]` table into a sorted `Mapping`.
///
/// Values must be unique: the same table is read value → key when a target
/// script is compiled back into dialect source.
pub fn parse_names_toml(toml_str: &str) -> Result<Mapping, NamesConfigError> {
    let config: NamesConfig =
        toml::from_str(toml_str).map_err(|e| NamesConfigError::Parse(e.to_string()))?;

    if config.names.is_empty() {
        return Err(NamesConfigError::Empty);
    }

    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (key, value) in &config.names {
        if key.is_empty() {
            return Err(NamesConfigError::EmptyKey);
        }
        if value.is_empty() {
            return Err(NamesConfigError::EmptyValue(key.clone()));
        }
        if let Some(first) = seen.insert(value, key) {
            return Err(NamesConfigError::DuplicateValue {
                value: value.clone(),
                first: first.to_string(),
                second: key.clone(),
            });
        }
    }

    let mut mapping: Mapping = config.names.into_iter().collect();
    mapping.sort_by_key_len();
    Ok(mapping)
}
