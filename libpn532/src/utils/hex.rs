//! Hexadecimal helpers used for wire-level logging and display.
//!
//! `Hex` formats lazily, so `log::trace!("{}", Hex(&buf))` costs nothing when
//! the level is disabled.

use std::fmt;

/// Lazy lowercase, space separated hex rendering of a byte slice.
pub struct Hex<'a>(pub &'a [u8]);

impl fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Convert a byte slice to a lowercase hex string without separators.
///
/// Example: `&[0xde, 0xad]` -> `"dead"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Convert a byte slice to a lowercase hex string with a single space between
/// each byte.
///
/// Example: `&[0xde, 0xad]` -> `"de ad"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    Hex(bytes).to_string()
}

/// Parse a hex string into bytes.
///
/// Accepts whitespace, `:` or `-` between bytes (the forms card tools print
/// UIDs in). Returns an error message string on parse failure.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let cleaned: Vec<u8> = s
        .bytes()
        .filter(|c| !c.is_ascii_whitespace() && *c != b':' && *c != b'-')
        .collect();

    if cleaned.len() % 2 != 0 {
        return Err("hex string has odd length".to_string());
    }

    cleaned
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).map_err(|e| e.to_string())?;
            u8::from_str_radix(text, 16).map_err(|e| format!("invalid hex pair '{}': {}", text, e))
        })
        .collect()
}

/// Render bytes as printable ASCII, replacing everything else with `.`.
pub fn bytes_to_ascii_safe(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}
