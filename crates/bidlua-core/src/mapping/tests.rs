use std::fs;
use std::path::Path;

use proptest::prelude::*;

use super::*;
use crate::charset::Charset;
use crate::scanner::substitute;

fn builtin() -> Mapping {
    let mut m: Mapping = [("функция", "function"), ("конец", "end"), ("если", "if")]
        .into_iter()
        .collect();
    m.sort_by_key_len();
    m
}

fn keys(m: &Mapping) -> Vec<&str> {
    m.iter().map(|(k, _)| k).collect()
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

#[test]
fn test_insert_overwrites_in_place() {
    let mut m = Mapping::new();
    assert_eq!(m.insert("a", "1"), None);
    assert_eq!(m.insert("b", "2"), None);
    assert_eq!(m.insert("a", "3"), Some("1".to_string()));
    assert_eq!(m.len(), 2);
    assert_eq!(keys(&m), vec!["a", "b"]);
    assert_eq!(m.get("a"), Some("3"));
    assert!(m.contains_key("b"));
    assert!(!m.contains_key("c"));
}

#[test]
fn test_sort_by_key_len_is_stable() {
    let mut m: Mapping = [("ab", "1"), ("c", "2"), ("xyz", "3"), ("de", "4"), ("f", "5")]
        .into_iter()
        .collect();
    m.sort_by_key_len();
    assert_eq!(keys(&m), vec!["xyz", "ab", "de", "c", "f"]);
    assert!(m.is_sorted_by_key_len());
    // Lookups still work after reordering.
    assert_eq!(m.get("de"), Some("4"));
}

#[test]
fn test_sort_counts_characters_not_bytes() {
    // "если" is 8 bytes but 4 characters.
    let mut m: Mapping = [("если", "if"), ("elseif", "x")].into_iter().collect();
    m.sort_by_key_len();
    assert_eq!(keys(&m), vec!["elseif", "если"]);
}

#[test]
fn test_merge_overrides() {
    let mut base = builtin();
    let overlay: Mapping = [("конец", "END"), ("новый", "new")].into_iter().collect();
    base.merge(&overlay);
    assert_eq!(base.get("конец"), Some("END"));
    assert_eq!(base.get("новый"), Some("new"));
    assert_eq!(base.len(), 4);
}

#[test]
fn test_patterns_per_direction() {
    let m = builtin();
    let forward: Vec<&str> = m.patterns(Direction::Forward).iter().map(|p| p.0).collect();
    assert_eq!(forward, vec!["функция", "конец", "если"]);
    let reverse: Vec<(&str, &str)> = m.patterns(Direction::Reverse);
    assert_eq!(
        reverse,
        vec![("function", "функция"), ("end", "конец"), ("if", "если")]
    );
}

#[test]
fn test_reverse_shared_value_goes_to_latest_layer() {
    let mut m: Mapping = [("конец", "end")].into_iter().collect();
    let overlay: Mapping = [("кон", "end")].into_iter().collect();
    m.merge(&overlay);
    m.sort_by_key_len();

    assert_eq!(m.patterns(Direction::Forward).len(), 2);
    assert_eq!(m.patterns(Direction::Reverse), vec![("end", "кон")]);
}

#[test]
fn test_reverse_shared_value_follows_overwrite() {
    let mut m = Mapping::new();
    m.insert("а", "x");
    m.insert("б", "x");
    assert_eq!(m.patterns(Direction::Reverse), vec![("x", "б")]);
    // Rewriting a key makes it the most recent again.
    m.insert("а", "x");
    assert_eq!(m.patterns(Direction::Reverse), vec![("x", "а")]);
}

#[test]
fn test_merge_keeps_overlay_write_order() {
    // Written short-then-long, stored long-then-short after the sort.
    let mut overlay = Mapping::new();
    overlay.insert("к", "v");
    overlay.insert("длинный", "v");
    overlay.sort_by_key_len();

    let mut m = Mapping::new();
    m.merge(&overlay);
    assert_eq!(m.patterns(Direction::Reverse), vec![("v", "длинный")]);
}

#[test]
fn test_direction_from_path() {
    assert_eq!(
        Direction::from_path(Path::new("main.blya")),
        Some(Direction::Forward)
    );
    assert_eq!(
        Direction::from_path(Path::new("dir/main.lua")),
        Some(Direction::Reverse)
    );
    assert_eq!(Direction::from_path(Path::new("main.txt")), None);
    assert_eq!(Direction::from_path(Path::new("main")), None);
    assert_eq!(Direction::Forward.reversed(), Direction::Reverse);
}

proptest! {
    #[test]
    fn sort_is_idempotent(pairs in prop::collection::vec(("[a-zа-я]{1,6}", "[a-z]{0,4}"), 0..30)) {
        let mut m: Mapping = pairs.into_iter().collect();
        m.sort_by_key_len();
        let once = m.clone();
        prop_assert!(once.is_sorted_by_key_len());
        m.sort_by_key_len();
        prop_assert_eq!(m, once);
    }
}

// ---------------------------------------------------------------------------
// Map file / directive parsing
// ---------------------------------------------------------------------------

#[test]
fn test_parse_map_entries() {
    let content = "ADD вывести::print;\nSET тип::type;\njunk ADD ::nokey; ADD a::b;ADD a::c;";
    let m = parse_map_entries(content);
    assert_eq!(m.get("вывести"), Some("print"));
    assert_eq!(m.get("тип"), Some("type"));
    // Later duplicates win.
    assert_eq!(m.get("a"), Some("c"));
    assert!(!m.contains_key(""));
    assert_eq!(m.len(), 3);
}

#[test]
fn test_parse_map_entries_ignores_malformed() {
    let m = parse_map_entries("ADD a:b;\nadd c::d;\nADD e::f\nADDg::h;");
    assert!(m.is_empty());
}

#[test]
fn test_parse_map_entries_does_not_span_lines() {
    let m = parse_map_entries("ADD a::b\n;");
    assert!(m.is_empty());
}

#[test]
fn test_extract_inline_directives() {
    let (m, stripped) = extract_inline_directives("#add x::y; print(x)");
    assert_eq!(m.get("x"), Some("y"));
    assert_eq!(stripped, " print(x)");
    assert!(!stripped.contains("#add x::y;"));
}

#[test]
fn test_extract_strips_every_occurrence() {
    let src = "#add a::b;\nx = 1\n#add a::b;\n-- #add a::b;\n";
    let (m, stripped) = extract_inline_directives(src);
    assert_eq!(m.len(), 1);
    assert_eq!(stripped, "\nx = 1\n\n-- \n");
}

#[test]
fn test_extract_without_directives() {
    let (m, stripped) = extract_inline_directives("если x тогда конец");
    assert!(m.is_empty());
    assert_eq!(stripped, "если x тогда конец");
}

// ---------------------------------------------------------------------------
// MapBuilder
// ---------------------------------------------------------------------------

#[test]
fn test_build_without_external() {
    let b = builtin();
    let built = MapBuilder::new(Direction::Forward)
        .builtin(&b)
        .build("#add x::y; print(x)")
        .unwrap();
    assert_eq!(built.external, ExternalMap::NotRequested);
    assert_eq!(built.inline_entries, 1);
    assert_eq!(built.mapping.get("x"), Some("y"));
    assert_eq!(built.mapping.len(), 4);
    assert!(built.mapping.is_sorted_by_key_len());
    assert_eq!(built.source, " print(x)");
}

#[test]
fn test_build_external_overrides_builtin_and_inline_overrides_external() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("user.map.blya");
    fs::write(&path, "ADD конец::END;\nADD если::IF;\n").unwrap();

    let b = builtin();
    let built = MapBuilder::new(Direction::Forward)
        .builtin(&b)
        .external(Some(&path))
        .build("#add если::when; если a конец")
        .unwrap();

    assert_eq!(
        built.external,
        ExternalMap::Loaded {
            path: path.clone(),
            entries: 2
        }
    );
    assert_eq!(built.mapping.get("функция"), Some("function"));
    assert_eq!(built.mapping.get("конец"), Some("END"));
    assert_eq!(built.mapping.get("если"), Some("when"));
    assert_eq!(built.mapping.len(), 3);
}

#[test]
fn test_build_missing_external_falls_back_to_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.map.blya");

    let b = builtin();
    let built = MapBuilder::new(Direction::Forward)
        .builtin(&b)
        .external(Some(&path))
        .build("если")
        .unwrap();

    assert!(built.external.is_missing());
    assert_eq!(built.external, ExternalMap::Missing(path));
    assert_eq!(built.mapping, b);
}

#[test]
fn test_build_reads_external_with_charset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("utf16.map.blya");
    let bytes = Charset::Utf16Le.encode("ADD пусто::nil;").unwrap();
    fs::write(&path, bytes).unwrap();

    let built = MapBuilder::new(Direction::Forward)
        .external(Some(&path))
        .charset(Charset::Utf16Le)
        .build("")
        .unwrap();
    assert_eq!(built.mapping.get("пусто"), Some("nil"));
}

#[test]
fn test_build_decode_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.map.blya");
    fs::write(&path, [0xFF, 0xFE, 0xFD]).unwrap();

    let err = MapBuilder::new(Direction::Forward)
        .external(Some(&path))
        .build("")
        .unwrap_err();
    assert!(matches!(err, MapBuildError::Decode { .. }));
    assert!(err.to_string().contains("bad.map.blya"));
}

#[test]
fn test_build_external_path_is_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = MapBuilder::new(Direction::Forward)
        .external(Some(dir.path()))
        .build("")
        .unwrap_err();
    assert!(matches!(err, MapBuildError::Io { .. }));
}

#[test]
fn test_build_reverse_keeps_inline_directives() {
    let b = builtin();
    let src = "#add x::y; print(x)";
    let built = MapBuilder::new(Direction::Reverse)
        .builtin(&b)
        .build(src)
        .unwrap();
    assert_eq!(built.inline_entries, 0);
    assert_eq!(built.source, src);
    assert!(!built.mapping.contains_key("x"));
}

#[test]
fn test_build_external_wins_reverse_collision() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("user.map.blya");
    fs::write(&path, "ADD кон::end;\n").unwrap();
    let b: Mapping = [("конец", "end")].into_iter().collect();

    let forward = MapBuilder::new(Direction::Forward)
        .builtin(&b)
        .external(Some(&path))
        .build("")
        .unwrap();
    assert_eq!(
        substitute("кон конец", &forward.mapping, Direction::Forward),
        "end end"
    );

    let reverse = MapBuilder::new(Direction::Reverse)
        .builtin(&b)
        .external(Some(&path))
        .build("")
        .unwrap();
    assert_eq!(
        substitute("if x end", &reverse.mapping, Direction::Reverse),
        "if x кон"
    );
}
