use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::config::{parse_translit_toml, TranslitConfigError};

pub(super) const DEFAULT_TOML: &str = include_str!("default_translit.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Returns the embedded default transliteration TOML.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

/// Unit → romanization table with longest-unit-first lookup.
#[derive(Debug)]
pub struct TranslitTable {
    units: BTreeMap<String, String>,
    /// Longest unit, in characters.
    max_unit_chars: usize,
}

impl TranslitTable {
    pub fn new(units: BTreeMap<String, String>) -> Self {
        let max_unit_chars = units.keys().map(|u| u.chars().count()).max().unwrap_or(0);
        Self {
            units,
            max_unit_chars,
        }
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, TranslitConfigError> {
        parse_translit_toml(toml_str).map(Self::new)
    }

    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), TranslitConfigError> {
        // Validate eagerly
        parse_translit_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| TranslitConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static TranslitTable {
        static INSTANCE: OnceLock<TranslitTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            TranslitTable::from_toml(toml_str).expect("transliteration TOML must be valid")
        })
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Lower-case `text` and romanize it unit by unit.
    ///
    /// At each position the longest unit in the table wins; a character no
    /// unit covers is copied as-is.
    pub fn romanize(&self, text: &str) -> String {
        let chars: Vec<char> = text.to_lowercase().chars().collect();
        let mut out = String::with_capacity(chars.len() * 2);
        let mut unit = String::new();
        let mut i = 0;

        'outer: while i < chars.len() {
            let longest = self.max_unit_chars.min(chars.len() - i);
            for len in (1..=longest).rev() {
                unit.clear();
                unit.extend(&chars[i..i + len]);
                if let Some(latin) = self.units.get(&unit) {
                    out.push_str(latin);
                    i += len;
                    continue 'outer;
                }
            }
            out.push(chars[i]);
            i += 1;
        }

        out
    }
}
