/*
 *  display/components/circle.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Bresenham circle, outline and filled
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

use crate::display::color::PixelValue;
use crate::display::surface::PixelSurface;

/// Draw a circle centred on (x, y)
///
/// Four symmetric points are plotted per step in `outline`; with `fill` a
/// horizontal span is added on both scanlines of the step. Nothing is drawn
/// when the centre is off the surface or the radius is negative.
pub fn draw_circle(
    surface: &mut PixelSurface,
    x: i32,
    y: i32,
    radius: i32,
    outline: PixelValue,
    fill: Option<PixelValue>,
) {
    if radius < 0 || surface.pixel(x, y).is_none() {
        return;
    }
    // beyond W + H the outline misses every pixel and a fill covers them all
    let reach = i64::from(surface.width()) + i64::from(surface.height());
    let radius = i64::from(radius).min(reach) as i32;

    let mut x_pos = -radius;
    let mut y_pos = 0;
    let mut err = 2 - 2 * radius;

    loop {
        surface.set_pixel(x - x_pos, y + y_pos, outline);
        surface.set_pixel(x + x_pos, y + y_pos, outline);
        surface.set_pixel(x + x_pos, y - y_pos, outline);
        surface.set_pixel(x - x_pos, y - y_pos, outline);

        if let Some(value) = fill {
            let span = 2 * -x_pos + 1;
            surface.hline(x + x_pos, y + y_pos, span, value);
            surface.hline(x + x_pos, y - y_pos, span, value);
        }

        let mut e2 = err;
        if e2 <= y_pos {
            y_pos += 1;
            err += y_pos * 2 + 1;
            if -x_pos == y_pos && e2 <= x_pos {
                e2 = 0;
            }
        }
        if e2 > x_pos {
            x_pos += 1;
            err += x_pos * 2 + 1;
        }
        if x_pos > 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::surface::PixelEncoding;
    use std::collections::HashSet;

    fn set_points(s: &PixelSurface) -> HashSet<(i32, i32)> {
        let mut pts = HashSet::new();
        for y in 0..s.height() as i32 {
            for x in 0..s.width() as i32 {
                if s.is_set(x, y) {
                    pts.insert((x, y));
                }
            }
        }
        pts
    }

    #[test]
    fn test_radius_six_point_set() {
        let mut s = PixelSurface::new(128, 64, PixelEncoding::PackedColumnMajor1Bit);
        draw_circle(&mut s, 24, 24, 6, PixelValue::ON, None);

        let octant = [(6, 0), (6, 1), (6, 2), (5, 3), (4, 4), (3, 5), (2, 6), (1, 6), (0, 6)];
        let mut expected = HashSet::new();
        for (dx, dy) in octant {
            for (sx, sy) in [(1, 1), (-1, 1), (-1, -1), (1, -1)] {
                expected.insert((24 + sx * dx, 24 + sy * dy));
            }
        }
        let got = set_points(&s);
        assert_eq!(got.len(), 32);
        assert_eq!(got, expected);

        // 90 degree symmetry about the centre
        for &(px, py) in &got {
            let (dx, dy) = (px - 24, py - 24);
            assert!(got.contains(&(24 - dy, 24 + dx)));
        }
    }

    #[test]
    fn test_filled_covers_interior() {
        let mut s = PixelSurface::new(64, 64, PixelEncoding::PackedRowMajor1Bit);
        draw_circle(&mut s, 20, 20, 5, PixelValue::ON, Some(PixelValue::ON));
        assert!(s.is_set(20, 20));
        assert!(s.is_set(17, 22));
        assert!(!s.is_set(26, 20));
    }

    #[test]
    fn test_off_surface_or_negative_is_noop() {
        let mut s = PixelSurface::new(32, 32, PixelEncoding::PackedColumnMajor1Bit);
        draw_circle(&mut s, 32, 5, 3, PixelValue::ON, None);
        draw_circle(&mut s, -1, 5, 3, PixelValue::ON, None);
        draw_circle(&mut s, 5, 5, -1, PixelValue::ON, None);
        assert_eq!(s.count_set(), 0);
    }

    #[test]
    fn test_zero_radius_is_single_pixel() {
        let mut s = PixelSurface::new(8, 8, PixelEncoding::PackedColumnMajor1Bit);
        draw_circle(&mut s, 3, 3, 0, PixelValue::ON, Some(PixelValue::ON));
        assert_eq!(s.count_set(), 1);
    }

    #[test]
    fn test_huge_radius() {
        let mut s = PixelSurface::new(32, 32, PixelEncoding::PackedColumnMajor1Bit);
        draw_circle(&mut s, 10, 10, i32::MAX / 2 + 10, PixelValue::ON, None);
        assert_eq!(s.count_set(), 0);
        draw_circle(&mut s, 10, 10, i32::MAX, PixelValue::OFF, Some(PixelValue::ON));
        assert_eq!(s.count_set(), 32 * 32);
    }
}
