/*
 *  display/components/rssi.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Signal strength bars
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

use crate::constants::GLYPH_BARS;
use crate::display::color::PixelValue;
use crate::display::surface::PixelSurface;

/// Bars for a received signal strength in dBm
///
/// -72 and -60 themselves fall between intervals and draw nothing.
pub fn rssi_bars(dbm: i32) -> u8 {
    if dbm <= -102 {
        1
    } else if dbm < -72 {
        2
    } else if dbm > -72 && dbm < -60 {
        3
    } else if dbm > -60 {
        4
    } else {
        0
    }
}

/// Draw `bars` ascending bars, bottom aligned, top-left at (x, y)
pub fn draw_rssi(surface: &mut PixelSurface, x: i32, y: i32, bars: u8, scale: f32, value: PixelValue) {
    let s = scale.max(0.0);
    let bar_width = (3.0 * s) as i32;
    let gap = (1.0 * s) as i32;
    let unit = (3.0 * s) as i32;
    let baseline = y.saturating_add(unit.saturating_mul(GLYPH_BARS as i32));

    for i in 0..bars.min(GLYPH_BARS) as i32 {
        let h = unit.saturating_mul(i + 1);
        let left = x.saturating_add(i.saturating_mul(bar_width.saturating_add(gap)));
        surface.fill_rect(left, baseline.saturating_sub(h), bar_width, h, value);
    }
}
