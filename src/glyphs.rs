/*
 *  glyphs.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use crate::constants::SAVE_GLYPH_SIZE;
use crate::display::surface::PixelEncoding;

/// Borrowed source image for [`PixelSurface::blit`](crate::display::PixelSurface::blit).
///
/// The data is laid out the same way a surface of the given encoding would
/// be; for RGB565 sources any non-black pixel counts as set.
#[derive(Debug, Clone, Copy)]
pub struct Bitmap<'a> {
    pub width: u32,
    pub height: u32,
    pub encoding: PixelEncoding,
    pub data: &'a [u8],
}

impl<'a> Bitmap<'a> {
    pub const fn new(width: u32, height: u32, encoding: PixelEncoding, data: &'a [u8]) -> Self {
        Self { width, height, encoding, data }
    }

    /// Whether the source pixel at (x, y) is set; false when out of range
    /// or when the data is shorter than the geometry claims.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        match self.encoding {
            PixelEncoding::Rgb565 => {
                let i = ((y * self.width + x) * 2) as usize;
                matches!(self.data.get(i..i + 2), Some(px) if px[0] != 0 || px[1] != 0)
            }
            enc => enc
                .bit_address(self.width, x, y)
                .and_then(|(i, mask)| self.data.get(i).map(|b| b & mask != 0))
                .unwrap_or(false),
        }
    }
}

/// Floppy-disk "save" icon, 32x32, column-major (byte = 8 rows, LSB on top).
pub const SAVE_GLYPH: [u8; 128] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x3d,
    0x3d, 0x3d, 0x3d, 0x3d, 0x3d, 0x3d, 0x3d, 0x01, 0xff, 0xff, 0xfe, 0xfc, 0xf8, 0xf0, 0xe0, 0xc0,
    0xff, 0xff, 0xff, 0xff, 0x0f, 0x0f, 0x0f, 0x4f, 0x4f, 0x4f, 0x4f, 0x4f, 0x4f, 0x4f, 0x4f, 0x4f,
    0x4f, 0x4f, 0x4f, 0x4f, 0x4f, 0x4f, 0x4f, 0x4f, 0x4f, 0x0f, 0x0f, 0x0f, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x92, 0x92, 0x92, 0x92, 0x92, 0x92, 0x92, 0x92, 0x92,
    0x92, 0x92, 0x92, 0x92, 0x92, 0x92, 0x92, 0x92, 0x92, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xef, 0xff, 0xc0, 0xc0, 0xc0, 0xcd, 0xcd, 0xcd, 0xcd, 0xcd, 0xcd, 0xcd, 0xcd, 0xcd,
    0xcd, 0xcd, 0xcd, 0xcd, 0xcd, 0xcd, 0xcd, 0xcd, 0xcd, 0xc0, 0xc0, 0xc0, 0xff, 0xef, 0xff, 0xff,
];

pub const fn save_glyph() -> Bitmap<'static> {
    Bitmap::new(SAVE_GLYPH_SIZE, SAVE_GLYPH_SIZE, PixelEncoding::PackedColumnMajor1Bit, &SAVE_GLYPH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_glyph_corners() {
        let g = save_glyph();
        // left edge column is solid in all four pages
        for y in 0..32 {
            assert!(g.is_set(0, y), "row {y}");
        }
        // page 0 column 8 only has the top bit
        assert!(g.is_set(8, 0));
        assert!(!g.is_set(8, 1));
        assert!(!g.is_set(32, 0));
    }
}
