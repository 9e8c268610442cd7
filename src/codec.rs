//! Wire format of pixels and window coordinates.
//!
//! Writes use a packed 16 bit RGB565 word, big endian. Reads come back from
//! most controllers as one full byte per channel, so the read format is three
//! bytes wide and gets truncated to RGB565 again while decoding.

/// Packs 8 bit red, green and blue components into a RGB565 color.
///
/// The low bits of every channel are dropped (3 for red and blue, 2 for green).
pub const fn color565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xf8) << 8) | ((g as u16 & 0xfc) << 3) | (b as u16 >> 3)
}

/// Splits a RGB565 color into its 8 bit components.
///
/// Only the truncated precision survives, the low bits of each channel are zero.
pub const fn rgb(color: u16) -> (u8, u8, u8) {
    (
        ((color >> 8) & 0xf8) as u8,
        ((color >> 3) & 0xfc) as u8,
        ((color << 3) & 0xf8) as u8,
    )
}

/// Encodes a color in the 2 byte write format.
#[inline]
pub fn encode_pixel(color: u16) -> [u8; 2] {
    color.to_be_bytes()
}

/// Decodes a pixel from the 3 byte (r, g, b) read format.
#[inline]
pub fn decode_pixel(data: &[u8; 3]) -> u16 {
    color565(data[0], data[1], data[2])
}

/// Encodes a start/end coordinate pair for the column and page set commands.
#[inline]
pub fn encode_position(a: u16, b: u16) -> [u8; 4] {
    let [a_hi, a_lo] = a.to_be_bytes();
    let [b_hi, b_lo] = b.to_be_bytes();
    [a_hi, a_lo, b_hi, b_lo]
}
