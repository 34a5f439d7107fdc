use std::collections::BTreeMap;

use serde::Deserialize;

use crate::unicode::is_latin;

#[derive(Deserialize)]
struct TranslitConfig {
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslitConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("empty unit")]
    EmptyUnit,
    #[error("unit is not lower-case: {0}")]
    UpperCaseUnit(String),
    #[error("value for {unit} is not Latin letters: {value}")]
    NonLatinValue { unit: String, value: String },
    #[error("invalid directive name: {0:?}")]
    InvalidDirective(String),
    #[error("transliteration table already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a sorted `BTreeMap<unit, romanization>`.
///
/// Units are compared against the lower-cased directive argument, so an
/// upper-case unit could never match and is rejected. Values may be empty
/// (the hard and soft signs romanize to nothing).
pub fn parse_translit_toml(
    toml_str: &str,
) -> Result<BTreeMap<String, String>, TranslitConfigError> {
    let config: TranslitConfig =
        toml::from_str(toml_str).map_err(|e| TranslitConfigError::Parse(e.to_string()))?;

    if config.mappings.is_empty() {
        return Err(TranslitConfigError::Empty);
    }

    for (unit, value) in &config.mappings {
        if unit.is_empty() {
            return Err(TranslitConfigError::EmptyUnit);
        }
        if unit.to_lowercase() != *unit {
            return Err(TranslitConfigError::UpperCaseUnit(unit.clone()));
        }
        if !value.chars().all(is_latin) {
            return Err(TranslitConfigError::NonLatinValue {
                unit: unit.clone(),
                value: value.clone(),
            });
        }
    }

    Ok(config.mappings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_toml() {
        let toml = r#"
[mappings]
"а" = "a"
"щ" = "shch"
"ь" = ""
"#;
        let map = parse_translit_toml(toml).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["щ"], "shch");
        assert_eq!(map["ь"], "");
    }

    #[test]
    fn parse_default_toml() {
        let map = parse_translit_toml(super::super::table::DEFAULT_TOML).unwrap();
        assert!(map.len() >= 33, "expected 33+ units, got {}", map.len());
        assert_eq!(map["ж"], "zh");
        assert_eq!(map["и\u{0306}"], "y");
    }

    #[test]
    fn error_empty_mappings() {
        let err = parse_translit_toml("[mappings]\n").unwrap_err();
        assert!(matches!(err, TranslitConfigError::Empty));
    }

    #[test]
    fn error_empty_unit() {
        let toml = r#"
[mappings]
"" = "a"
"#;
        let err = parse_translit_toml(toml).unwrap_err();
        assert!(matches!(err, TranslitConfigError::EmptyUnit));
    }

    #[test]
    fn error_upper_case_unit() {
        let toml = r#"
[mappings]
"Ж" = "zh"
"#;
        let err = parse_translit_toml(toml).unwrap_err();
        assert!(matches!(err, TranslitConfigError::UpperCaseUnit(_)));
    }

    #[test]
    fn error_non_latin_value() {
        let toml = r#"
[mappings]
"ж" = "ž"
"#;
        let err = parse_translit_toml(toml).unwrap_err();
        assert!(matches!(err, TranslitConfigError::NonLatinValue { .. }));
        assert!(err.to_string().contains('ж'));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_translit_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, TranslitConfigError::Parse(_)));
    }
}
