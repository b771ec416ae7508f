//! 5x7 column font for banner text
//!
//! Each glyph is five column bytes, bit 0 = top row. Only uppercase
//! letters, digits, space and a little punctuation are included; lowercase
//! is folded to uppercase and anything else renders as a blank cell.

use heapless::Vec;

/// Columns per glyph, excluding the spacing column
pub const GLYPH_WIDTH: usize = 5;

/// Rows per glyph
pub const GLYPH_HEIGHT: u8 = 7;

const BLANK: [u8; GLYPH_WIDTH] = [0x00; GLYPH_WIDTH];

const DIGITS: [[u8; GLYPH_WIDTH]; 10] = [
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
];

const LETTERS: [[u8; GLYPH_WIDTH]; 26] = [
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
];

/// Text rendering error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextError {
    /// Text did not fit in the column buffer
    Overflow,
    /// Row offset pushes the glyph past the top of a 16-row column
    RowOffset,
}

/// Column bytes for `c`
pub fn glyph(c: char) -> [u8; GLYPH_WIDTH] {
    match c.to_ascii_uppercase() {
        d @ '0'..='9' => DIGITS[d as usize - '0' as usize],
        l @ 'A'..='Z' => LETTERS[l as usize - 'A' as usize],
        '!' => [0x00, 0x00, 0x5F, 0x00, 0x00],
        '-' => [0x08, 0x08, 0x08, 0x08, 0x08],
        '.' => [0x00, 0x60, 0x60, 0x00, 0x00],
        ':' => [0x00, 0x36, 0x36, 0x00, 0x00],
        _ => BLANK,
    }
}

/// Render `text` as marquee columns
///
/// Each glyph contributes five columns plus one blank spacing column. Glyph
/// row `y` lands on grid row `y + row_offset`. On overflow `out` keeps the
/// columns that fit. An offset that would cut off glyph rows is rejected
/// before anything is written.
pub fn render_text<const N: usize>(
    text: &str,
    row_offset: u8,
    out: &mut Vec<u16, N>,
) -> Result<(), TextError> {
    if u32::from(row_offset) + u32::from(GLYPH_HEIGHT) > u16::BITS {
        return Err(TextError::RowOffset);
    }

    for c in text.chars() {
        for column in glyph(c) {
            out.push(u16::from(column) << row_offset)
                .map_err(|_| TextError::Overflow)?;
        }
        out.push(0).map_err(|_| TextError::Overflow)?;
    }
    Ok(())
}
