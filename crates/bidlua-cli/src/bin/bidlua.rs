use std::path::PathBuf;

use clap::{Parser, Subcommand};

use bidlua_cli::commands::options::CompileArgs;
use bidlua_cli::commands::{compile_ops, config_ops, map_ops};
use bidlua_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(
    name = "bidlua",
    version,
    about = "Compile BidLua (.blya) sources to Lua (.lua) and back"
)]
struct Cli {
    /// Log compile stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a .blya file to .lua or a .lua file to .blya
    Compile {
        /// Input file (.blya or .lua)
        input: PathBuf,
        /// Output file (.blya or .lua), created if missing
        output: PathBuf,
        #[command(flatten)]
        opts: CompileArgs,
    },
    /// Show the mapping an input file would be compiled with
    Map {
        /// Input file (.blya or .lua)
        input: PathBuf,
        #[command(flatten)]
        opts: CompileArgs,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export the built-in name table as TOML
    NamesExport,
    /// Validate a custom name table TOML file
    NamesValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export the default transliteration table as TOML
    TranslitExport,
    /// Validate a custom transliteration TOML file
    TranslitValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Compile {
            input,
            output,
            opts,
        } => compile_ops::compile_cmd(&input, &output, &opts),
        Command::Map { input, opts, json } => map_ops::map_cmd(&input, &opts, json),
        Command::NamesExport => config_ops::names_export(),
        Command::NamesValidate { file } => config_ops::names_validate(&file),
        Command::TranslitExport => config_ops::translit_export(),
        Command::TranslitValidate { file } => config_ops::translit_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
