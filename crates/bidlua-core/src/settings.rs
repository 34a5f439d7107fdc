//! Compiler settings loaded from TOML.
//!
//! Unlike the name and transliteration tables these are not a process-wide
//! singleton: the driver parses them, turns them into `CompileOptions` and
//! passes those into every `compile` call.

use std::path::PathBuf;

use serde::Deserialize;

use crate::charset::Charset;
use crate::compile::{CompileOptions, MissingMapPolicy};
use crate::unicode::is_ascii_identifier;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub compile: CompileSettings,
    pub translit: TranslitSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompileSettings {
    pub charset: String,
    #[serde(default)]
    pub stop_on_error: bool,
    #[serde(default)]
    pub ignore_default_map: bool,
    #[serde(default)]
    pub map: Option<PathBuf>,
    /// Parsed `charset`.
    #[serde(skip)]
    charset_parsed: Charset,
}

impl CompileSettings {
    pub fn charset(&self) -> Charset {
        self.charset_parsed
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslitSettings {
    pub directive: String,
}

impl Settings {
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            map_path: self.compile.map.clone(),
            charset: self.compile.charset(),
            ignore_builtin: self.compile.ignore_default_map,
            missing_map: if self.compile.stop_on_error {
                MissingMapPolicy::Abort
            } else {
                MissingMapPolicy::Continue
            },
            translit_directive: self.translit.directive.clone(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("default settings TOML must be valid")
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;

    s.compile.charset_parsed =
        s.compile
            .charset
            .parse()
            .map_err(|e: crate::charset::CharsetError| SettingsError::InvalidValue {
                field: "compile.charset".to_string(),
                reason: e.to_string(),
            })?;

    if !is_ascii_identifier(&s.translit.directive) {
        return Err(SettingsError::InvalidValue {
            field: "translit.directive".to_string(),
            reason: "must be an ASCII identifier".to_string(),
        });
    }

    Ok(s)
}
