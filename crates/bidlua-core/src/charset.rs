//! Text encodings accepted for source, output and map files.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum CharsetError {
    #[error("unknown charset: {0}")]
    Unknown(String),
    #[error("invalid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("invalid UTF-16 data")]
    InvalidUtf16,
    #[error("UTF-16 input has an odd number of bytes ({0})")]
    OddLength(usize),
    #[error("non-ASCII byte 0x{byte:02X} at offset {offset}")]
    NonAscii { byte: u8, offset: usize },
    #[error("character {ch:?} cannot be encoded as {charset}")]
    Unmappable { ch: char, charset: Charset },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    Latin1,
    Ascii,
}

const BOM: char = '\u{FEFF}';

impl Charset {
    pub fn label(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Utf16Le => "UTF-16LE",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Ascii => "US-ASCII",
        }
    }

    /// Decode file bytes. A leading byte-order mark is dropped.
    pub fn decode(self, bytes: &[u8]) -> Result<String, CharsetError> {
        let text = match self {
            Charset::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| {
                CharsetError::InvalidUtf8 {
                    offset: e.utf8_error().valid_up_to(),
                }
            })?,
            Charset::Utf16Le | Charset::Utf16Be => {
                if bytes.len() % 2 != 0 {
                    return Err(CharsetError::OddLength(bytes.len()));
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| match self {
                        Charset::Utf16Le => u16::from_le_bytes([pair[0], pair[1]]),
                        _ => u16::from_be_bytes([pair[0], pair[1]]),
                    })
                    .collect();
                String::from_utf16(&units).map_err(|_| CharsetError::InvalidUtf16)?
            }
            Charset::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Charset::Ascii => {
                if let Some(offset) = bytes.iter().position(|b| !b.is_ascii()) {
                    return Err(CharsetError::NonAscii {
                        byte: bytes[offset],
                        offset,
                    });
                }
                bytes.iter().map(|&b| char::from(b)).collect()
            }
        };
        Ok(match text.strip_prefix(BOM) {
            Some(rest) => rest.to_string(),
            None => text,
        })
    }

    pub fn encode(self, text: &str) -> Result<Vec<u8>, CharsetError> {
        match self {
            Charset::Utf8 => Ok(text.as_bytes().to_vec()),
            Charset::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Charset::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Charset::Latin1 | Charset::Ascii => {
                let limit = if self == Charset::Latin1 { 0xFF } else { 0x7F };
                text.chars()
                    .map(|ch| {
                        u8::try_from(u32::from(ch))
                            .ok()
                            .filter(|&b| u32::from(b) <= limit)
                            .ok_or(CharsetError::Unmappable { ch, charset: self })
                    })
                    .collect()
            }
        }
    }
}

impl FromStr for Charset {
    type Err = CharsetError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Charset::Utf8),
            "utf-16le" | "utf16le" => Ok(Charset::Utf16Le),
            "utf-16be" | "utf16be" => Ok(Charset::Utf16Be),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Ok(Charset::Latin1),
            "us-ascii" | "ascii" => Ok(Charset::Ascii),
            _ => Err(CharsetError::Unknown(label.to_string())),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
