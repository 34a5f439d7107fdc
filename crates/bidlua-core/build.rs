fn main() {
    // Validate embedded TOML files at compile time.
    validate_toml(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
    );
    validate_toml(
        "src/names/default_names.toml",
        include_str!("src/names/default_names.toml"),
    );
    validate_toml(
        "src/translit/default_translit.toml",
        include_str!("src/translit/default_translit.toml"),
    );
}

fn validate_toml(path: &str, content: &str) {
    if content.parse::<toml::Value>().is_err() {
        panic!("{path} contains invalid TOML");
    }
}
