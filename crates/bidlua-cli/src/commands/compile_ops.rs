use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use bidlua_core::mapping::Direction;
use bidlua_core::{compile, names, CompileError, CompileWarning};

use super::options::{install_tables, resolve_options, CompileArgs};

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error(
        "Input and output extension must be \".blya\" or \".lua\". < input > path: {}; < output > path: {}",
        input.display(),
        output.display()
    )]
    Extension { input: PathBuf, output: PathBuf },
    #[error("File in < input > doesn't exist: {}", .0.display())]
    InputMissing(PathBuf),
}

/// Validate an input/output pair and derive the direction from the input.
pub fn check_paths(input: &Path, output: &Path) -> Result<Direction, PathError> {
    let extension_error = || PathError::Extension {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
    };
    let direction = Direction::from_path(input).ok_or_else(extension_error)?;
    Direction::from_path(output).ok_or_else(extension_error)?;
    if !input.is_file() {
        return Err(PathError::InputMissing(input.to_path_buf()));
    }
    Ok(direction)
}

pub fn missing_map_message(path: &Path) -> String {
    format!(
        "File {} doesn't exist.\nCheck again the path to the file (file extension should be \".map.blya\").",
        path.display()
    )
}

pub const CONTINUE_MESSAGE: &str = "Continue compiling.";
pub const STOP_MESSAGE: &str = "Compiling was stopped because \"--stop-on-error\" is set. To compile anyway, remove this flag.";

pub fn compile_cmd(input: &Path, output: &Path, args: &CompileArgs) {
    die!(install_tables(args), "{}");
    let options = die!(resolve_options(args), "{}");
    let direction = die!(check_paths(input, output), "{}");

    let input_name = input.display();
    let output_name = output.display();

    let bytes = die!(fs::read(input), "Error reading {input_name}: {}");
    let source = die!(
        options.charset.decode(&bytes),
        "Error decoding {input_name}: {}"
    );

    let out = match compile(&source, direction, names::builtin(), &options) {
        Ok(out) => out,
        Err(CompileError::MissingMapFile(path)) => {
            eprintln!("{}", missing_map_message(&path));
            eprintln!("{STOP_MESSAGE}");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    for warning in &out.warnings {
        match warning {
            CompileWarning::MissingMapFile(path) => {
                println!("{}", missing_map_message(path));
                println!("{CONTINUE_MESSAGE}");
            }
        }
    }

    let encoded = die!(
        options.charset.encode(&out.text),
        "Error encoding {output_name}: {}"
    );
    die!(fs::write(output, encoded), "Error writing {output_name}: {}");
    println!("Compiled successfully.");
}
