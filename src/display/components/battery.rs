/*
 *  display/components/battery.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Battery glyph with bar levels and the charging pulse
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

/// Bars for a charge percentage
///
/// Levels are open intervals: a state sitting exactly on 5, 25, 50, 75 or
/// 100 (or outside them, or NaN) draws no bars.
pub fn battery_bars(state: f32) -> u8 {
    const LEVELS: [(f32, f32, u8); 4] = [(5.0, 25.0, 1), (25.0, 50.0, 2), (50.0, 75.0, 3), (75.0, 100.0, 4)];
    LEVELS
        .iter()
        .find(|(lo, hi, _)| state > *lo && state < *hi)
        .map_or(0, |(_, _, bars)| *bars)
}

/// Scaled battery outline: body, terminal nub and four bar slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryGlyph {
    pub body_width: i32,
    pub body_height: i32,
    pub nub_width: i32,
    pub nub_height: i32,
    pub padding: i32,
    pub gap: i32,
}

impl BatteryGlyph {
    pub fn new(scale: f32) -> Self {
        let s = scale.max(0.0);
        Self {
            body_width: (24.0 * s) as i32,
            body_height: (12.0 * s) as i32,
            nub_width: (2.0 * s) as i32,
            nub_height: (6.0 * s) as i32,
            padding: (2.0 * s) as i32,
            gap: (1.0 * s) as i32,
        }
    }

    pub fn bar_width(&self) -> i32 {
        self.body_width
            .saturating_sub(self.padding.saturating_mul(2))
            .saturating_sub(self.gap.saturating_mul(GLYPH_BARS as i32 - 1))
            / GLYPH_BARS as i32
    }

    pub fn bar_height(&self) -> i32 {
        self.body_height.saturating_sub(self.padding.saturating_mul(2))
    }

    pub fn draw_outline(&self, surface: &mut PixelSurface, x: i32, y: i32, value: PixelValue) {
        surface.rect(x, y, self.body_width, self.body_height, value);
        surface.fill_rect(
            x.saturating_add(self.body_width),
            y.saturating_add((self.body_height - self.nub_height) / 2),
            self.nub_width,
            self.nub_height,
            value,
        );
    }

    /// Fill the first `count` bar slots, left to right
    pub fn draw_bars(&self, surface: &mut PixelSurface, x: i32, y: i32, count: u8, value: PixelValue) {
        let w = self.bar_width();
        for i in 0..count.min(GLYPH_BARS) as i32 {
            surface.fill_rect(
                x.saturating_add(self.padding).saturating_add(i.saturating_mul(w.saturating_add(self.gap))),
                y.saturating_add(self.padding),
                w,
                self.bar_height(),
                value,
            );
        }
    }

    /// Blank the whole glyph area, nub included
    pub fn erase(&self, surface: &mut PixelSurface, x: i32, y: i32, value: PixelValue) {
        surface.fill_rect(x, y, self.body_width.saturating_add(self.nub_width), self.body_height, value);
    }
}

/// Bar counts of the charging animation, 1 through 4
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChargingPulse {
    next: u8,
}

impl ChargingPulse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restart(&mut self) {
        self.next = 0;
    }
}

impl Iterator for ChargingPulse {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.next >= GLYPH_BARS {
            return None;
        }
        self.next += 1;
        Some(self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::surface::PixelEncoding;

    #[test]
    fn test_open_interval_levels() {
        assert_eq!(battery_bars(4.9), 0);
        assert_eq!(battery_bars(5.0), 0);
        assert_eq!(battery_bars(5.1), 1);
        assert_eq!(battery_bars(25.0), 0);
        assert_eq!(battery_bars(30.0), 2);
        assert_eq!(battery_bars(50.0), 0);
        assert_eq!(battery_bars(74.9), 3);
        assert_eq!(battery_bars(75.0), 0);
        assert_eq!(battery_bars(99.0), 4);
        assert_eq!(battery_bars(100.0), 0);
        assert_eq!(battery_bars(-10.0), 0);
        assert_eq!(battery_bars(f32::NAN), 0);
    }

    #[test]
    fn test_geometry_at_unit_scale() {
        let g = BatteryGlyph::new(1.0);
        assert_eq!(g.bar_width(), 4);
        assert_eq!(g.bar_height(), 8);
    }

    #[test]
    fn test_outline_and_bars_pixel_count() {
        let mut s = PixelSurface::new(128, 64, PixelEncoding::PackedColumnMajor1Bit);
        let g = BatteryGlyph::new(1.0);
        g.draw_outline(&mut s, 10, 10, PixelValue::ON);
        assert_eq!(s.count_set(), 68 + 12);
        g.draw_bars(&mut s, 10, 10, 2, PixelValue::ON);
        assert_eq!(s.count_set(), 68 + 12 + 2 * 32);
        g.erase(&mut s, 10, 10, PixelValue::OFF);
        assert_eq!(s.count_set(), 0);
    }

    #[test]
    fn test_charging_pulse() {
        let mut pulse = ChargingPulse::new();
        assert_eq!(pulse.by_ref().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(pulse.next(), None);
        pulse.restart();
        assert_eq!(pulse.next(), Some(1));
    }

    #[test]
    fn test_extreme_placement_and_scale() {
        let mut s = PixelSurface::new(128, 64, PixelEncoding::PackedColumnMajor1Bit);
        let g = BatteryGlyph::new(1.0);
        g.draw_outline(&mut s, i32::MAX - 10, i32::MAX - 3, PixelValue::ON);
        g.draw_bars(&mut s, i32::MAX - 10, 0, 4, PixelValue::ON);
        assert_eq!(s.count_set(), 0);

        let huge = BatteryGlyph::new(f32::MAX);
        huge.draw_outline(&mut s, 0, 0, PixelValue::ON);
        huge.draw_bars(&mut s, 0, 0, 4, PixelValue::ON);
        huge.erase(&mut s, 0, 0, PixelValue::OFF);
        assert_eq!(s.count_set(), 0);
    }
}
