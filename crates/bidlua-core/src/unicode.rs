//! Character-level helpers shared by the mapping and transliteration tables.

pub fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Length used to order mapping keys and transliteration units.
///
/// Counted in Unicode scalar values rather than bytes so that a Cyrillic
/// keyword and a Latin keyword of the same visible length sort together.
/// Either measure keeps a key ahead of every one of its proper prefixes.
pub fn text_len(s: &str) -> usize {
    s.chars().count()
}

/// True if `s` is a non-empty ASCII identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_ascii_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
