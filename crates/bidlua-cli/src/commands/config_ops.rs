use std::fs;

use bidlua_core::{names, settings, translit};

pub fn names_export() {
    print!("{}", names::default_toml());
}

pub fn names_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let map = die!(names::parse_names_toml(&content), "Error: {}");
    println!("OK: {} names", map.len());
}

pub fn translit_export() {
    print!("{}", translit::default_toml());
}

pub fn translit_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let map = die!(translit::parse_translit_toml(&content), "Error: {}");
    println!("OK: {} units", map.len());
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: compile.charset={}, compile.stop_on_error={}, compile.ignore_default_map={}, translit.directive={}",
        s.compile.charset(),
        s.compile.stop_on_error,
        s.compile.ignore_default_map,
        s.translit.directive
    );
}
