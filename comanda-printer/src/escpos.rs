//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data.

use crate::encoding::convert_to_cp1252;
use crate::layout::{divider, double_columns, pad_line};

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for thermal printers.
/// Text is converted to Windows-1252 by [`build`](Self::build).
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(2048);
        // Initialize printer (ESC @)
        buf.extend_from_slice(&[0x1B, 0x40]);
        Self { buf, width }
    }

    // === Text Output ===

    /// Write text
    ///
    /// ASCII control characters print as spaces, so record text can never
    /// carry printer commands or line breaks into the stream.
    pub fn text(&mut self, s: &str) -> &mut Self {
        let mut scratch = [0u8; 4];
        for c in s.chars() {
            if c.is_ascii_control() {
                self.buf.push(b' ');
            } else {
                self.buf
                    .extend_from_slice(c.encode_utf8(&mut scratch).as_bytes());
            }
        }
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    /// Print and feed n lines
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        // ESC d n
        self.buf.extend_from_slice(&[0x1B, 0x64, lines]);
        self
    }

    // === Alignment ===

    /// Align text to center
    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    /// Align text to left (default)
    pub fn left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x00]);
        self
    }

    /// Align text to right
    pub fn right(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x02]);
        self
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    /// Double width and height
    pub fn double_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x11]);
        self
    }

    /// Triple width and height
    pub fn large_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x22]);
        self
    }

    /// Reset to normal size
    pub fn reset_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]);
        self
    }

    // === Separators ===

    /// Print a line of '=' characters
    pub fn sep_double(&mut self) -> &mut Self {
        self.line(&divider(self.width, '='))
    }

    /// Print a line of '-' characters
    pub fn sep_single(&mut self) -> &mut Self {
        self.line(&divider(self.width, '-'))
    }

    // === Layout Helpers ===

    /// Print left and right text on the same line at normal size
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let line = pad_line(left, right, self.width);
        self.line(&line)
    }

    /// Print left and right text on the same line at double width
    ///
    /// Use after [`double_size`](Self::double_size).
    pub fn line_lr_double(&mut self, left: &str, right: &str) -> &mut Self {
        let line = pad_line(left, right, double_columns(self.width));
        self.line(&line)
    }

    // === Paper Control ===

    /// Cut paper (full cut)
    pub fn cut(&mut self) -> &mut Self {
        // GS V 0 - Full cut
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x00]);
        self
    }

    // === Build ===

    /// Build the final byte buffer with Windows-1252 text
    pub fn build(self) -> Vec<u8> {
        convert_to_cp1252(&self.buf)
    }

    /// Build without transcoding (UTF-8 text, for previews and tests)
    pub fn build_raw(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_starts_with_init() {
        let b = EscPosBuilder::new(32);
        assert_eq!(b.build_raw(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_builder_basic() {
        let mut b = EscPosBuilder::new(32);
        b.center()
            .bold()
            .double_size()
            .line("COMANDA")
            .reset_size()
            .bold_off()
            .left()
            .line("Cliente");

        let data = b.build_raw();
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("\x1B\x61\x01\x1B\x45\x01\x1D\x21\x11COMANDA\n"));
        assert!(s.contains("\x1D\x21\x00\x1B\x45\x00\x1B\x61\x00Cliente\n"));
    }

    #[test]
    fn test_feed_and_cut() {
        let mut b = EscPosBuilder::new(32);
        b.feed(4).cut();
        assert_eq!(b.build_raw(), vec![0x1B, 0x40, 0x1B, 0x64, 4, 0x1D, 0x56, 0x00]);
    }

    #[test]
    fn test_line_lr() {
        let mut b = EscPosBuilder::new(20);
        b.line_lr("SUBTOTAL:", "R$ 1,00");

        let data = b.build_raw();
        let s = String::from_utf8_lossy(&data[2..]);
        assert_eq!(s, "SUBTOTAL:    R$ 1,00\n");
    }

    #[test]
    fn test_line_lr_double_halves_budget() {
        let mut b = EscPosBuilder::new(48);
        b.line_lr_double("TOTAL:", "R$ 58,50");

        let data = b.build_raw();
        let s = String::from_utf8_lossy(&data[2..]);
        assert_eq!(s.trim_end_matches('\n').chars().count(), 24);
    }

    #[test]
    fn test_separators() {
        let mut b = EscPosBuilder::new(10);
        b.sep_double().sep_single();

        let data = b.build_raw();
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("==========\n----------\n"));
    }

    #[test]
    fn test_text_blanks_control_characters() {
        let mut b = EscPosBuilder::new(32);
        b.line("Ana\x1D\x56\x00 Lima").line("sem gelo\r\ncom limão");

        let data = b.build_raw();
        assert_eq!(&data[2..], "Ana    Lima\nsem gelo  com limão\n".as_bytes());
        assert!(!data.windows(2).any(|w| w == [0x1D, 0x56]));
    }

    #[test]
    fn test_build_transcodes_text() {
        let mut b = EscPosBuilder::new(32);
        b.line("Pão");
        let data = b.build();
        // code page select, init, code page select, text
        assert_eq!(
            data,
            vec![0x1B, 0x74, 0x10, 0x1B, 0x40, 0x1B, 0x74, 0x10, b'P', 0xE3, b'o', b'\n']
        );
    }
}
