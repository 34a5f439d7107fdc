//! One compilation: transliterate, build the mapping, substitute.

use std::path::PathBuf;

use tracing::{debug, debug_span};

use crate::charset::Charset;
use crate::mapping::{Direction, ExternalMap, MapBuildError, MapBuilder, Mapping};
use crate::scanner::Substituter;
use crate::translit::{TranslitConfigError, Transliterator, DEFAULT_DIRECTIVE};

/// What to do when the requested map file does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingMapPolicy {
    /// Compile with the remaining layers and report a warning.
    #[default]
    Continue,
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub map_path: Option<PathBuf>,
    /// Charset of the external map file. The driver also decodes the input
    /// and encodes the output with it.
    pub charset: Charset,
    /// Leave the built-in name table out of the mapping.
    pub ignore_builtin: bool,
    pub missing_map: MissingMapPolicy,
    pub translit_directive: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            map_path: None,
            charset: Charset::default(),
            ignore_builtin: false,
            missing_map: MissingMapPolicy::default(),
            translit_directive: DEFAULT_DIRECTIVE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileWarning {
    MissingMapFile(PathBuf),
}

#[derive(Debug)]
pub struct CompileOutput {
    pub text: String,
    /// The mapping the text was rewritten with.
    pub mapping: Mapping,
    pub warnings: Vec<CompileWarning>,
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("map file {} does not exist", .0.display())]
    MissingMapFile(PathBuf),
    #[error(transparent)]
    Map(#[from] MapBuildError),
    #[error(transparent)]
    Translit(#[from] TranslitConfigError),
}

/// Compile `source` in `direction`.
///
/// `builtin` is the lowest mapping layer; pass `names::builtin()` for the
/// standard table.
pub fn compile(
    source: &str,
    direction: Direction,
    builtin: &Mapping,
    options: &CompileOptions,
) -> Result<CompileOutput, CompileError> {
    let _span = debug_span!("compile", ?direction, len = source.len()).entered();

    let transliterated = Transliterator::new(&options.translit_directive)?.transliterate(source);

    let mut builder = MapBuilder::new(direction)
        .external(options.map_path.as_deref())
        .charset(options.charset);
    if !options.ignore_builtin {
        builder = builder.builtin(builtin);
    }
    let built = builder.build(&transliterated)?;

    let mut warnings = Vec::new();
    if let ExternalMap::Missing(path) = built.external {
        match options.missing_map {
            MissingMapPolicy::Abort => return Err(CompileError::MissingMapFile(path)),
            MissingMapPolicy::Continue => warnings.push(CompileWarning::MissingMapFile(path)),
        }
    }

    let text = Substituter::new(&built.mapping, direction).substitute(&built.source);
    debug!(out_len = text.len(), warnings = warnings.len());

    Ok(CompileOutput {
        text,
        mapping: built.mapping,
        warnings,
    })
}
