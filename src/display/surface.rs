/*
 *  display/surface.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Packed pixel buffer in the layout the panel controller expects
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use core::convert::Infallible;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, Rectangle};
use log::debug;

use crate::display::color::PixelValue;
use crate::display::error::DisplayError;
use crate::font8x8::glyph_rows;
use crate::glyphs::Bitmap;

/// Longest line walked point by point without clipping first
const MAX_LINE_SPAN: i64 = 1 << 16;

/// Buffer layouts understood by the supported controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelEncoding {
    /// 8 horizontal pixels per byte, MSB leftmost, rows of ceil(W/8) bytes
    PackedRowMajor1Bit,
    /// 8 vertical pixels per byte, LSB on top, pages of W bytes
    PackedColumnMajor1Bit,
    /// 2 bytes per pixel, big-endian
    Rgb565,
}

impl PixelEncoding {
    pub fn buffer_len(self, width: u32, height: u32) -> usize {
        let (w, h) = (width as usize, height as usize);
        match self {
            PixelEncoding::PackedRowMajor1Bit => w.div_ceil(8) * h,
            PixelEncoding::PackedColumnMajor1Bit => w * h.div_ceil(8),
            PixelEncoding::Rgb565 => w * h * 2,
        }
    }

    pub fn is_mono(self) -> bool {
        !matches!(self, PixelEncoding::Rgb565)
    }

    /// Byte index and bit mask of an in-range pixel; `None` for RGB565.
    pub(crate) fn bit_address(self, width: u32, x: u32, y: u32) -> Option<(usize, u8)> {
        let (w, x, y) = (width as usize, x as usize, y as usize);
        match self {
            PixelEncoding::PackedRowMajor1Bit => Some((y * w.div_ceil(8) + x / 8, 0x80 >> (x % 8))),
            PixelEncoding::PackedColumnMajor1Bit => Some(((y / 8) * w + x, 1 << (y % 8))),
            PixelEncoding::Rgb565 => None,
        }
    }
}

/// Fixed-size pixel buffer
///
/// Every coordinate taking method clips: anything outside `[0,W) x [0,H)` is
/// silently dropped. The buffer is allocated once and never resized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    encoding: PixelEncoding,
    buf: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32, encoding: PixelEncoding) -> Self {
        let buf = vec![0u8; encoding.buffer_len(width, height)];
        Self { width, height, encoding, buf }
    }

    /// Wrap an existing buffer, e.g. one captured from a transfer.
    pub fn from_raw(
        width: u32,
        height: u32,
        encoding: PixelEncoding,
        buf: Vec<u8>,
    ) -> Result<Self, DisplayError> {
        let expected = encoding.buffer_len(width, height);
        if buf.len() != expected {
            return Err(DisplayError::BufferSizeMismatch { expected, actual: buf.len() });
        }
        Ok(Self { width, height, encoding, buf })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn encoding(&self) -> PixelEncoding {
        self.encoding
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    fn in_bounds(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            None
        } else {
            Some((x as u32, y as u32))
        }
    }

    fn rgb_index(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 2) as usize
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, value: PixelValue) {
        let Some((x, y)) = self.in_bounds(x, y) else {
            return;
        };
        match self.encoding.bit_address(self.width, x, y) {
            Some((i, mask)) => {
                if value.is_set() {
                    self.buf[i] |= mask;
                } else {
                    self.buf[i] &= !mask;
                }
            }
            None => {
                let i = self.rgb_index(x, y);
                let raw = value.to_rgb565().into_storage().to_be_bytes();
                self.buf[i..i + 2].copy_from_slice(&raw);
            }
        }
    }

    /// Stored value at (x, y), `None` outside the surface
    pub fn pixel(&self, x: i32, y: i32) -> Option<PixelValue> {
        let (x, y) = self.in_bounds(x, y)?;
        Some(match self.encoding.bit_address(self.width, x, y) {
            Some((i, mask)) => PixelValue::Mono(self.buf[i] & mask != 0),
            None => {
                let i = self.rgb_index(x, y);
                let raw = u16::from_be_bytes([self.buf[i], self.buf[i + 1]]);
                PixelValue::Color(Rgb565::from(RawU16::new(raw)))
            }
        })
    }

    pub fn is_set(&self, x: i32, y: i32) -> bool {
        self.pixel(x, y).is_some_and(|p| p.is_set())
    }

    /// Number of set pixels (non-black on RGB565)
    pub fn count_set(&self) -> usize {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_set(x, y))
            .count()
    }

    pub fn fill(&mut self, value: PixelValue) {
        if self.encoding.is_mono() {
            let byte = if value.is_set() { 0xFF } else { 0x00 };
            self.buf.fill(byte);
        } else {
            let raw = value.to_rgb565().into_storage().to_be_bytes();
            for px in self.buf.chunks_exact_mut(2) {
                px.copy_from_slice(&raw);
            }
        }
    }

    /// Part of a w x h span inside the surface, corners computed in i64
    fn clip(&self, x: i32, y: i32, w: i32, h: i32) -> Option<Rectangle> {
        if w <= 0 || h <= 0 {
            return None;
        }
        let (x0, y0) = (i64::from(x).max(0), i64::from(y).max(0));
        let x1 = (i64::from(x) + i64::from(w)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(h)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Rectangle::new(
            Point::new(x0 as i32, y0 as i32),
            Size::new((x1 - x0) as u32, (y1 - y0) as u32),
        ))
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, value: PixelValue) {
        let Some(area) = self.clip(x, y, w, h) else {
            return;
        };
        for p in area.points() {
            self.set_pixel(p.x, p.y, value);
        }
    }

    pub fn hline(&mut self, x: i32, y: i32, w: i32, value: PixelValue) {
        self.fill_rect(x, y, w, 1, value);
    }

    pub fn vline(&mut self, x: i32, y: i32, h: i32, value: PixelValue) {
        self.fill_rect(x, y, 1, h, value);
    }

    /// Bresenham line, both end points included
    ///
    /// Segments spanning more than `MAX_LINE_SPAN` pixels are clipped to the
    /// surface first; iteration stops once the line has left the surface.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, value: PixelValue) {
        let span = |a: i32, b: i32| (i64::from(b) - i64::from(a)).abs();
        let (start, end) = if span(x1, x2).max(span(y1, y2)) > MAX_LINE_SPAN {
            match self.clip_segment(x1, y1, x2, y2) {
                Some(ends) => ends,
                None => return,
            }
        } else {
            (Point::new(x1, y1), Point::new(x2, y2))
        };

        // a digital line is monotonic, so its run inside the surface is contiguous
        let mut entered = false;
        for p in Line::new(start, end).points() {
            if self.in_bounds(p.x, p.y).is_some() {
                entered = true;
                self.set_pixel(p.x, p.y, value);
            } else if entered {
                break;
            }
        }
    }

    // Liang-Barsky against the pixel grid
    fn clip_segment(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Option<(Point, Point)> {
        let (ox, oy) = (f64::from(x1), f64::from(y1));
        let (dx, dy) = (f64::from(x2) - ox, f64::from(y2) - oy);
        let (xmax, ymax) = (f64::from(self.width) - 1.0, f64::from(self.height) - 1.0);
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

        for (p, q) in [(-dx, ox), (dx, xmax - ox), (-dy, oy), (dy, ymax - oy)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }
        let at = |t: f64| Point::new((ox + t * dx).round() as i32, (oy + t * dy).round() as i32);
        Some((at(t0), at(t1)))
    }

    /// One pixel border
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, value: PixelValue) {
        if w <= 0 || h <= 0 {
            return;
        }
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        self.hline(x, y, w, value);
        self.hline(x, bottom, w, value);
        self.vline(x, y, h, value);
        self.vline(right, y, h, value);
    }

    /// Draw the set bits of `bitmap` as `value`; unset bits are transparent.
    pub fn blit(&mut self, bitmap: &Bitmap<'_>, x: i32, y: i32, value: PixelValue) {
        for by in 0..bitmap.height {
            for bx in 0..bitmap.width {
                if bitmap.is_set(bx, by) {
                    self.set_pixel(x.saturating_add(bx as i32), y.saturating_add(by as i32), value);
                }
            }
        }
    }

    pub fn draw_glyph(&mut self, character: char, x: i32, y: i32, value: PixelValue) {
        for (row, bits) in glyph_rows(character).iter().enumerate() {
            for col in 0..8 {
                if bits >> col & 1 == 1 {
                    self.set_pixel(x.saturating_add(col), y.saturating_add(row as i32), value);
                }
            }
        }
    }

    /// Render `text` left to right, 8 pixels per character, no wrapping.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, value: PixelValue) {
        let mut cx = x;
        for c in text.chars() {
            self.draw_glyph(c, cx, y, value);
            cx = cx.saturating_add(8);
        }
    }

    /// Rotate the image clockwise by a multiple of 90 degrees
    ///
    /// Only 1-bit encodings rotate; content leaving a non-square surface is
    /// lost. Returns whether the buffer was touched.
    pub fn rotate(&mut self, degrees: i32) -> bool {
        let turn = degrees.rem_euclid(360);
        if !self.encoding.is_mono() || turn % 90 != 0 {
            debug!("rotate({}) unsupported for {:?}", degrees, self.encoding);
            return false;
        }
        if turn == 0 {
            return true;
        }
        let src = self.clone();
        self.fill(PixelValue::OFF);
        let (w, h) = (self.width as i32, self.height as i32);
        for y in 0..h {
            for x in 0..w {
                if !src.is_set(x, y) {
                    continue;
                }
                let (tx, ty) = match turn {
                    90 => (h - 1 - y, x),
                    180 => (w - 1 - x, h - 1 - y),
                    _ => (y, w - 1 - x),
                };
                self.set_pixel(tx, ty, PixelValue::ON);
            }
        }
        true
    }
}

impl OriginDimensions for PixelSurface {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for PixelSurface {
    type Color = PixelValue;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            self.set_pixel(p.x, p.y, c);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;
    use embedded_graphics::primitives::{Circle, PrimitiveStyle};

    #[test]
    fn test_out_of_range_is_noop() {
        let mut s = PixelSurface::new(128, 64, PixelEncoding::PackedColumnMajor1Bit);
        let before = s.clone();
        for (x, y) in [(-1, 0), (0, -1), (128, 0), (0, 64), (i32::MAX, i32::MIN)] {
            s.set_pixel(x, y, PixelValue::ON);
        }
        assert_eq!(s, before);
        assert_eq!(s.pixel(128, 0), None);
    }

    #[test]
    fn test_extreme_spans_are_clipped() {
        let mut s = PixelSurface::new(128, 64, PixelEncoding::PackedColumnMajor1Bit);
        s.fill_rect(i32::MAX - 2, 0, 10, 10, PixelValue::ON);
        s.fill_rect(0, i32::MAX, i32::MAX, i32::MAX, PixelValue::ON);
        s.fill_rect(i32::MIN, i32::MIN, i32::MAX, i32::MAX, PixelValue::ON);
        s.rect(i32::MAX - 1, i32::MAX - 1, i32::MAX, i32::MAX, PixelValue::ON);
        s.draw_text("overflow", i32::MAX - 4, i32::MAX - 4, PixelValue::ON);
        assert_eq!(s.count_set(), 0);

        s.fill_rect(-10, -10, i32::MAX, 12, PixelValue::ON);
        assert_eq!(s.count_set(), 128 * 2);
    }

    #[test]
    fn test_long_lines_are_clipped() {
        let mut s = PixelSurface::new(128, 64, PixelEncoding::PackedColumnMajor1Bit);
        s.line(0, 5, i32::MAX, 5, PixelValue::ON);
        assert_eq!(s.count_set(), 128);

        s.line(i32::MIN, i32::MIN, i32::MAX, i32::MAX, PixelValue::OFF);
        assert!(!s.is_set(5, 5));
        assert!(s.is_set(6, 5));
        assert_eq!(s.count_set(), 127);

        s.line(-5, 200, i32::MAX, 200, PixelValue::ON);
        assert_eq!(s.count_set(), 127);
    }

    #[test]
    fn test_column_major_bit_placement() {
        let mut s = PixelSurface::new(128, 64, PixelEncoding::PackedColumnMajor1Bit);
        s.set_pixel(3, 9, PixelValue::ON);
        // page 1, column 3, bit 1
        assert_eq!(s.as_bytes()[128 + 3], 0b0000_0010);
        assert_eq!(s.count_set(), 1);
    }

    #[test]
    fn test_row_major_bit_placement() {
        let mut s = PixelSurface::new(200, 200, PixelEncoding::PackedRowMajor1Bit);
        s.set_pixel(9, 2, PixelValue::ON);
        assert_eq!(s.as_bytes()[2 * 25 + 1], 0x40);
        s.set_pixel(9, 2, PixelValue::OFF);
        assert!(s.as_bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_rgb565_is_big_endian() {
        let mut s = PixelSurface::new(4, 4, PixelEncoding::Rgb565);
        s.set_pixel(1, 0, PixelValue::Color(Rgb565::RED));
        assert_eq!(&s.as_bytes()[2..4], &[0xF8, 0x00]);
        assert_eq!(s.pixel(1, 0), Some(PixelValue::Color(Rgb565::RED)));
        s.set_pixel(2, 0, PixelValue::ON);
        assert_eq!(&s.as_bytes()[4..6], &[0xFF, 0xFF]);
    }

    #[test]
    fn test_fill_erases_previous_content() {
        let mut s = PixelSurface::new(84, 48, PixelEncoding::PackedColumnMajor1Bit);
        s.fill(PixelValue::OFF);
        s.set_pixel(10, 10, PixelValue::ON);
        s.fill(PixelValue::OFF);
        assert_eq!(s.count_set(), 0);
        s.fill(PixelValue::ON);
        assert_eq!(s.count_set(), 84 * 48);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut s = PixelSurface::new(16, 16, PixelEncoding::PackedRowMajor1Bit);
        s.fill_rect(12, 12, 10, 10, PixelValue::ON);
        assert_eq!(s.count_set(), 16);
        s.fill_rect(0, 0, 0, 5, PixelValue::ON);
        s.fill_rect(0, 0, -3, 5, PixelValue::ON);
        assert_eq!(s.count_set(), 16);
    }

    #[test]
    fn test_rect_border() {
        let mut s = PixelSurface::new(32, 32, PixelEncoding::PackedColumnMajor1Bit);
        s.rect(2, 2, 10, 5, PixelValue::ON);
        assert_eq!(s.count_set(), 26);
        assert!(!s.is_set(5, 4));
    }

    #[test]
    fn test_line_endpoints() {
        let mut s = PixelSurface::new(32, 32, PixelEncoding::PackedColumnMajor1Bit);
        s.line(0, 0, 7, 7, PixelValue::ON);
        assert_eq!(s.count_set(), 8);
        assert!(s.is_set(0, 0) && s.is_set(7, 7) && s.is_set(3, 3));
    }

    #[test]
    fn test_glyphs() {
        let mut a = PixelSurface::new(32, 8, PixelEncoding::PackedColumnMajor1Bit);
        a.draw_glyph(' ', 0, 0, PixelValue::ON);
        assert_eq!(a.count_set(), 0);

        a.draw_glyph('\u{7f}', 0, 0, PixelValue::ON);
        let mut b = PixelSurface::new(32, 8, PixelEncoding::PackedColumnMajor1Bit);
        b.draw_glyph('?', 0, 0, PixelValue::ON);
        assert_eq!(a, b);

        let mut text = PixelSurface::new(32, 8, PixelEncoding::PackedColumnMajor1Bit);
        text.draw_text("?I", 0, 0, PixelValue::ON);
        b.draw_glyph('I', 8, 0, PixelValue::ON);
        assert_eq!(text, b);
    }

    #[test]
    fn test_rotate_mono() {
        let mut s = PixelSurface::new(8, 8, PixelEncoding::PackedRowMajor1Bit);
        s.set_pixel(1, 0, PixelValue::ON);
        assert!(s.rotate(90));
        assert!(s.is_set(7, 1));
        assert!(s.rotate(180));
        assert!(s.is_set(0, 6));
        assert!(s.rotate(-90));
        assert!(s.is_set(6, 7));
        assert_eq!(s.count_set(), 1);
    }

    #[test]
    fn test_rotate_unsupported() {
        let mut s = PixelSurface::new(8, 8, PixelEncoding::Rgb565);
        s.set_pixel(1, 0, PixelValue::ON);
        let before = s.clone();
        assert!(!s.rotate(90));
        assert_eq!(s, before);

        let mut m = PixelSurface::new(8, 8, PixelEncoding::PackedColumnMajor1Bit);
        assert!(!m.rotate(45));
    }

    #[test]
    fn test_from_raw_checks_size() {
        assert!(PixelSurface::from_raw(8, 8, PixelEncoding::PackedColumnMajor1Bit, vec![0; 8]).is_ok());
        match PixelSurface::from_raw(8, 8, PixelEncoding::Rgb565, vec![0; 8]) {
            Err(DisplayError::BufferSizeMismatch { expected, actual }) => {
                assert_eq!((expected, actual), (128, 8));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_draw_target() {
        let mut s = PixelSurface::new(32, 32, PixelEncoding::PackedColumnMajor1Bit);
        Circle::new(Point::new(4, 4), 9)
            .into_styled(PrimitiveStyle::with_fill(PixelValue::ON))
            .draw(&mut s)
            .unwrap();
        assert!(s.is_set(8, 8));
        assert!(!s.is_set(0, 0));
    }
}
