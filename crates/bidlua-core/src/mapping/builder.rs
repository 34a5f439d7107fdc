use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, debug_span, warn};

use crate::charset::{Charset, CharsetError};

use super::{Direction, Mapping};

/// `ADD key::value;` in a map file. `SET` is the older spelling of the same entry.
const MAP_ENTRY_PATTERN: &str = r"(?:ADD|SET) (.*?)::(.*?);";
/// `#add key::value;` inside a dialect source file.
const INLINE_DIRECTIVE_PATTERN: &str = r"#add (.*?)::(.*?);";

fn map_entry_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MAP_ENTRY_PATTERN).expect("map entry pattern must be valid"))
}

fn inline_directive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(INLINE_DIRECTIVE_PATTERN).expect("inline directive pattern must be valid")
    })
}

#[derive(Debug, thiserror::Error)]
pub enum MapBuildError {
    #[error("failed to read map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode map file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: CharsetError,
    },
}

/// What happened to the external map file for this build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalMap {
    NotRequested,
    Loaded { path: PathBuf, entries: usize },
    /// The requested file does not exist; it contributed nothing.
    Missing(PathBuf),
}

impl ExternalMap {
    pub fn is_missing(&self) -> bool {
        matches!(self, ExternalMap::Missing(_))
    }
}

#[derive(Debug)]
pub struct BuiltMapping {
    /// Merged table, sorted by descending key length.
    pub mapping: Mapping,
    /// Source text with every inline directive removed.
    pub source: String,
    pub external: ExternalMap,
    pub inline_entries: usize,
}

/// Merges the layers of one compilation's mapping.
///
/// Precedence, lowest first: built-in table, external map file, inline
/// `#add` directives.
pub struct MapBuilder<'a> {
    direction: Direction,
    builtin: Option<&'a Mapping>,
    external_path: Option<&'a Path>,
    charset: Charset,
}

impl<'a> MapBuilder<'a> {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            builtin: None,
            external_path: None,
            charset: Charset::default(),
        }
    }

    pub fn builtin(mut self, builtin: &'a Mapping) -> Self {
        self.builtin = Some(builtin);
        self
    }

    pub fn external(mut self, path: Option<&'a Path>) -> Self {
        self.external_path = path;
        self
    }

    pub fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    pub fn build(&self, source: &str) -> Result<BuiltMapping, MapBuildError> {
        let _span = debug_span!("build_mapping", direction = ?self.direction).entered();

        let mut mapping = self.builtin.cloned().unwrap_or_default();

        let external = match self.external_path {
            None => ExternalMap::NotRequested,
            Some(path) => match load_map_file(path, self.charset)? {
                Some(entries) => {
                    mapping.merge(&entries);
                    ExternalMap::Loaded {
                        path: path.to_path_buf(),
                        entries: entries.len(),
                    }
                }
                None => {
                    warn!(path = %path.display(), "map file does not exist");
                    ExternalMap::Missing(path.to_path_buf())
                }
            },
        };

        // Inline directives are dialect syntax; a target script is scanned as-is.
        let (inline, source) = match self.direction {
            Direction::Forward => extract_inline_directives(source),
            Direction::Reverse => (Mapping::new(), source.to_string()),
        };
        mapping.merge(&inline);
        mapping.sort_by_key_len();

        debug!(
            entries = mapping.len(),
            inline = inline.len(),
            external = ?external
        );
        Ok(BuiltMapping {
            mapping,
            source,
            external,
            inline_entries: inline.len(),
        })
    }
}

/// Read a map file. `Ok(None)` means the file does not exist.
fn load_map_file(path: &Path, charset: Charset) -> Result<Option<Mapping>, MapBuildError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(MapBuildError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let content = charset
        .decode(&bytes)
        .map_err(|source| MapBuildError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(parse_map_entries(&content)))
}

/// Collect every `ADD key::value;` / `SET key::value;` entry in `content`.
///
/// Anything that does not match is ignored. Later duplicates overwrite
/// earlier ones; entries with an empty key are skipped.
pub fn parse_map_entries(content: &str) -> Mapping {
    let mut mapping = Mapping::new();
    for caps in map_entry_re().captures_iter(content) {
        if caps[1].is_empty() {
            continue;
        }
        mapping.insert(&caps[1], &caps[2]);
    }
    mapping
}

/// Pull `#add key::value;` directives out of a dialect source.
///
/// Returns the directive entries and the source with every literal
/// occurrence of each matched directive removed.
pub fn extract_inline_directives(source: &str) -> (Mapping, String) {
    let mut mapping = Mapping::new();
    let mut directives: Vec<&str> = Vec::new();
    for caps in inline_directive_re().captures_iter(source) {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        if !directives.contains(&whole) {
            directives.push(whole);
        }
        if caps[1].is_empty() {
            continue;
        }
        mapping.insert(&caps[1], &caps[2]);
    }

    let mut stripped = source.to_string();
    for directive in directives {
        stripped = stripped.replace(directive, "");
    }
    (mapping, stripped)
}
