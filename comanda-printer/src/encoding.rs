//! Windows-1252 encoding utilities for Latin thermal printers
//!
//! Receipt text (Portuguese names, addresses, notes) is printed with the
//! printer's WPC1252 code page. This module provides utilities for:
//! - Calculating printed string widths
//! - Converting UTF-8 to Windows-1252 while preserving ESC/POS commands

use encoding_rs::WINDOWS_1252;
use tracing::instrument;

/// ESC t 16 - Select character code table WPC1252
const SELECT_CP1252: [u8; 3] = [0x1B, 0x74, 0x10];

/// Replacement for characters the code page cannot represent
const UNMAPPABLE: u8 = b'?';

/// Get the printed width of a string
///
/// Every character maps to exactly one byte in Windows-1252 (unmappable
/// characters print as `?`), so the width is the character count.
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Convert mixed UTF-8 content (with ESC/POS commands) to Windows-1252
///
/// ASCII bytes (0x00-0x7F) are kept exactly as is, which protects ESC/POS
/// commands from being corrupted. Only bytes >= 0x80 are treated as UTF-8
/// sequences and transcoded.
///
/// The code page is selected at the start and again after every INIT
/// command (ESC @), since INIT resets it to the printer default.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn convert_to_cp1252(bytes: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(bytes.len() + SELECT_CP1252.len());
    result.extend_from_slice(&SELECT_CP1252);

    let mut buffer = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        // INIT resets the code table, select it again right after
        if b == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == 0x40 {
            flush_buffer(&mut buffer, &mut result);
            result.extend_from_slice(&[0x1B, 0x40]);
            result.extend_from_slice(&SELECT_CP1252);
            i += 2;
            continue;
        }

        if b < 128 {
            flush_buffer(&mut buffer, &mut result);
            result.push(b);
        } else {
            buffer.push(b);
        }
        i += 1;
    }

    flush_buffer(&mut buffer, &mut result);
    result
}

/// Flush the non-ASCII buffer, converting UTF-8 to Windows-1252
fn flush_buffer(buffer: &mut Vec<u8>, result: &mut Vec<u8>) {
    if buffer.is_empty() {
        return;
    }

    let s = String::from_utf8_lossy(buffer);
    let mut scratch = [0u8; 4];
    for c in s.chars() {
        let (encoded, _, unmappable) = WINDOWS_1252.encode(c.encode_utf8(&mut scratch));
        if unmappable {
            result.push(UNMAPPABLE);
        } else {
            result.extend_from_slice(&encoded);
        }
    }
    buffer.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("hello"), 5);
        assert_eq!(text_width("Feijão"), 6);
        assert_eq!(text_width(""), 0);
    }

    #[test]
    fn test_convert_selects_code_page() {
        let out = convert_to_cp1252(b"abc");
        assert_eq!(out, [0x1B, 0x74, 0x10, b'a', b'b', b'c']);
    }

    #[test]
    fn test_convert_latin_text() {
        let out = convert_to_cp1252("Feijão".as_bytes());
        // ã = 0xE3 in Windows-1252
        assert_eq!(&out[3..], &[b'F', b'e', b'i', b'j', 0xE3, b'o']);
    }

    #[test]
    fn test_convert_reselects_after_init() {
        let out = convert_to_cp1252(&[0x1B, 0x40, b'x']);
        assert_eq!(
            out,
            [0x1B, 0x74, 0x10, 0x1B, 0x40, 0x1B, 0x74, 0x10, b'x']
        );
    }

    #[test]
    fn test_convert_unmappable() {
        let out = convert_to_cp1252("a😀b".as_bytes());
        assert_eq!(&out[3..], b"a?b");
    }
}
