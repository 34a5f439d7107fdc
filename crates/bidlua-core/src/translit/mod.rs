//! Cyrillic-to-Latin transliteration pre-pass.
//!
//! `translit(текст)` anywhere in a source file is replaced by the
//! romanized argument (`tekst`) before any keyword substitution runs. The
//! call syntax disappears; the argument is a flat run up to the first `)`.

mod config;
mod table;

pub use config::{parse_translit_toml, TranslitConfigError};
pub use table::{default_toml, TranslitTable};

use regex::{Captures, Regex};
use tracing::debug;

use crate::unicode::is_ascii_identifier;

pub const DEFAULT_DIRECTIVE: &str = "translit";

pub struct Transliterator<'t> {
    pattern: Regex,
    table: &'t TranslitTable,
}

impl Transliterator<'static> {
    /// Directive `name(...)` backed by the global table.
    pub fn new(name: &str) -> Result<Self, TranslitConfigError> {
        Self::with_table(name, TranslitTable::global())
    }
}

impl<'t> Transliterator<'t> {
    pub fn with_table(name: &str, table: &'t TranslitTable) -> Result<Self, TranslitConfigError> {
        if !is_ascii_identifier(name) {
            return Err(TranslitConfigError::InvalidDirective(name.to_string()));
        }
        let pattern = Regex::new(&format!(r"{}\(([^)]*)\)", regex::escape(name)))
            .map_err(|_| TranslitConfigError::InvalidDirective(name.to_string()))?;
        Ok(Self { pattern, table })
    }

    /// Replace every directive occurrence in `text` with its romanized argument.
    pub fn transliterate(&self, text: &str) -> String {
        let mut count = 0usize;
        let out = self
            .pattern
            .replace_all(text, |caps: &Captures| {
                count += 1;
                self.table.romanize(&caps[1])
            })
            .into_owned();
        debug!(directives = count);
        out
    }
}
