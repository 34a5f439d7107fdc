use std::fs;
use std::path::Path;

use bidlua_core::mapping::{Direction, Mapping};
use bidlua_core::{compile, names, CompileWarning};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::compile_ops::missing_map_message;
use super::options::{install_tables, resolve_options, CompileArgs};

#[derive(Debug, Serialize)]
struct MapRow<'a> {
    key: &'a str,
    value: &'a str,
}

/// One `key → value` line per entry, arrows aligned by display width.
pub fn format_mapping(mapping: &Mapping) -> String {
    let width = mapping.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in mapping.iter() {
        let pad = " ".repeat(width - key.width());
        out.push_str(&format!("{key}{pad} \u{2192} {value}\n"));
    }
    out
}

pub fn format_mapping_json(mapping: &Mapping) -> serde_json::Result<String> {
    let rows: Vec<MapRow> = mapping
        .iter()
        .map(|(key, value)| MapRow { key, value })
        .collect();
    serde_json::to_string_pretty(&rows)
}

/// Print the mapping `input` would be compiled with.
pub fn map_cmd(input: &Path, args: &CompileArgs, json: bool) {
    die!(install_tables(args), "{}");
    let options = die!(resolve_options(args), "{}");
    let input_name = input.display();
    let direction = die!(
        Direction::from_path(input).ok_or("extension must be \".blya\" or \".lua\""),
        "Error: {input_name}: {}"
    );

    let bytes = die!(fs::read(input), "Error reading {input_name}: {}");
    let source = die!(
        options.charset.decode(&bytes),
        "Error decoding {input_name}: {}"
    );
    let out = die!(
        compile(&source, direction, names::builtin(), &options),
        "Error: {}"
    );
    for warning in &out.warnings {
        let CompileWarning::MissingMapFile(path) = warning;
        eprintln!("{}", missing_map_message(path));
    }

    if json {
        let text = die!(format_mapping_json(&out.mapping), "JSON serialization failed: {}");
        println!("{text}");
    } else {
        print!("{}", format_mapping(&out.mapping));
        eprintln!("{} entries ({:?})", out.mapping.len(), direction);
    }
}
