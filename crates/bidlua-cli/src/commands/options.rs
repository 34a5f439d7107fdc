//! Turns settings files and command-line flags into `CompileOptions`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bidlua_core::charset::Charset;
use bidlua_core::names::{self, NamesConfigError};
use bidlua_core::settings::{self, Settings, SettingsError};
use bidlua_core::translit::{TranslitConfigError, TranslitTable};
use bidlua_core::{CompileOptions, MissingMapPolicy};
use clap::Args;

/// Flags shared by every command that builds a mapping.
#[derive(Args, Debug, Default, Clone)]
pub struct CompileArgs {
    /// Charset of the input, output and map files
    #[arg(long)]
    pub charset: Option<String>,
    /// External map file (`ADD key::value;` entries)
    #[arg(long)]
    pub map: Option<PathBuf>,
    /// Stop instead of continuing when the map file is missing
    #[arg(long)]
    pub stop_on_error: bool,
    /// Leave the built-in name table out of the mapping
    #[arg(long)]
    pub ignore_default_map: bool,
    /// Settings TOML file (defaults to the embedded settings)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Name table TOML file replacing the built-in names
    #[arg(long)]
    pub names: Option<PathBuf>,
    /// Transliteration TOML file replacing the default table
    #[arg(long)]
    pub translit: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error in {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: SettingsError,
    },
    #[error("Error in {}: {source}", path.display())]
    Names {
        path: PathBuf,
        #[source]
        source: NamesConfigError,
    },
    #[error("Error in {}: {source}", path.display())]
    Translit {
        path: PathBuf,
        #[source]
        source: TranslitConfigError,
    },
    #[error("Unknown charset: {0}")]
    UnknownCharset(String),
}

/// Settings file (or embedded defaults) with flags layered on top.
pub fn resolve_options(args: &CompileArgs) -> Result<CompileOptions, OptionsError> {
    let settings = match &args.config {
        Some(path) => {
            let content = read(path)?;
            settings::parse_settings_toml(&content).map_err(|source| OptionsError::Settings {
                path: path.clone(),
                source,
            })?
        }
        None => Settings::default(),
    };

    let mut options = settings.compile_options();
    if let Some(label) = &args.charset {
        options.charset = label
            .parse::<Charset>()
            .map_err(|_| OptionsError::UnknownCharset(label.clone()))?;
    }
    if let Some(map) = &args.map {
        options.map_path = Some(map.clone());
    }
    if args.stop_on_error {
        options.missing_map = MissingMapPolicy::Abort;
    }
    if args.ignore_default_map {
        options.ignore_builtin = true;
    }
    Ok(options)
}

/// Install `--names` and `--translit` replacement tables, if given.
///
/// Must run before the first `names::builtin()` / `TranslitTable::global()`.
pub fn install_tables(args: &CompileArgs) -> Result<(), OptionsError> {
    if let Some(path) = &args.names {
        let content = read(path)?;
        names::init_custom(content).map_err(|source| OptionsError::Names {
            path: path.clone(),
            source,
        })?;
    }
    if let Some(path) = &args.translit {
        let content = read(path)?;
        TranslitTable::init_custom(content).map_err(|source| OptionsError::Translit {
            path: path.clone(),
            source,
        })?;
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, OptionsError> {
    fs::read_to_string(path).map_err(|source| OptionsError::Read {
        path: path.to_path_buf(),
        source,
    })
}
