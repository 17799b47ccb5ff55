/*
 *  display/components/progress.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Grid-snapped progress bar, filled or dash march
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

use crate::constants::{PROGRESS_BORDER, PROGRESS_STEP, TEXT_SIZE};
use crate::display::color::PixelValue;
use crate::display::surface::PixelSurface;

/// Bar placed on the 8x8 text grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBar {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ProgressBar {
    /// Snap to text cell (col, row), clamped to the last cell of the grid.
    pub fn snap(
        surface_width: u32,
        surface_height: u32,
        col: i32,
        row: i32,
        width: i32,
        height: i32,
    ) -> Self {
        let last_col = (surface_width as i32 / TEXT_SIZE - 1).max(0);
        let last_row = (surface_height as i32 / TEXT_SIZE - 1).max(0);
        Self {
            x: col.clamp(0, last_col) * TEXT_SIZE,
            y: row.clamp(0, last_row) * TEXT_SIZE,
            width,
            height,
        }
    }

    pub fn draw_border(&self, surface: &mut PixelSurface, value: PixelValue) {
        surface.rect(self.x, self.y, self.width, self.height, value);
    }

    /// Width of the fill at step `k`, before the border inset
    pub fn fill_width(&self, k: u8) -> i32 {
        (self.width as f32 / 100.0 * k as f32) as i32
    }

    pub fn draw_fill(&self, surface: &mut PixelSurface, k: u8, value: PixelValue) {
        surface.fill_rect(
            self.x + PROGRESS_BORDER,
            self.y + PROGRESS_BORDER,
            self.fill_width(k).saturating_sub(PROGRESS_BORDER),
            self.height.saturating_sub(PROGRESS_BORDER * 2),
            value,
        );
    }

    /// Draw the three pixel wide diagonal dash for step `k`
    ///
    /// Returns false, drawing nothing, once the dash would reach the right
    /// border.
    pub fn draw_dash(&self, surface: &mut PixelSurface, k: u8, value: PixelValue) -> bool {
        let k = k as i32;
        let x1 = self.x + PROGRESS_BORDER + k;
        let y1 = self.y + PROGRESS_BORDER;
        let x2 = x1.saturating_add(self.width / 8);
        let y2 = self.y.saturating_add(self.height).saturating_sub(PROGRESS_BORDER + 1);

        // bound is the bar's own right border, not the surface width
        if i64::from(x2) + 1 >= i64::from(self.x) + i64::from(self.width) - 1 {
            return false;
        }
        for dx in -1..=1 {
            surface.line(x1 + dx, y1, x2 + dx, y2, value);
        }
        true
    }
}

/// Steps `0, 8, 16, ..` below the clamped state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSteps {
    state: u8,
    next: u16,
}

impl ProgressSteps {
    pub fn new(state: i32) -> Self {
        Self { state: state.clamp(0, 100) as u8, next: 0 }
    }

    pub fn state(&self) -> u8 {
        self.state
    }

    pub fn restart(&mut self) {
        self.next = 0;
    }
}

impl Iterator for ProgressSteps {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.next >= self.state as u16 {
            return None;
        }
        let k = self.next as u8;
        self.next += PROGRESS_STEP as u16;
        Some(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::surface::PixelEncoding;

    #[test]
    fn test_snap_clamps_to_last_cell() {
        let bar = ProgressBar::snap(128, 64, 2, 4, 75, 12);
        assert_eq!((bar.x, bar.y), (16, 32));
        let bar = ProgressBar::snap(128, 64, 40, 9, 10, 10);
        assert_eq!((bar.x, bar.y), (120, 56));
        let bar = ProgressBar::snap(128, 64, -3, 0, 10, 10);
        assert_eq!(bar.x, 0);
    }

    #[test]
    fn test_steps() {
        assert_eq!(ProgressSteps::new(0).count(), 0);
        assert_eq!(ProgressSteps::new(1).collect::<Vec<_>>(), vec![0]);
        assert_eq!(ProgressSteps::new(100).count(), 13);
        assert_eq!(ProgressSteps::new(250).last(), Some(96));
        assert_eq!(ProgressSteps::new(-5).state(), 0);

        let mut steps = ProgressSteps::new(17);
        assert_eq!(steps.by_ref().count(), 3);
        steps.restart();
        assert_eq!(steps.next(), Some(0));
    }

    #[test]
    fn test_full_fill_stays_inside_border() {
        let mut s = PixelSurface::new(128, 64, PixelEncoding::PackedColumnMajor1Bit);
        let bar = ProgressBar::snap(128, 64, 2, 2, 40, 8);
        bar.draw_border(&mut s, PixelValue::ON);
        for k in ProgressSteps::new(100) {
            bar.draw_fill(&mut s, k, PixelValue::ON);
        }
        // last step is k = 96: 38 px wide minus the inset
        assert!(s.is_set(16 + 2 + 35, 16 + 2));
        assert!(!s.is_set(16 + 2 + 36, 16 + 2));
        assert!(!s.is_set(16 + 1, 16 + 1));
    }

    #[test]
    fn test_first_fill_step_is_empty() {
        let mut s = PixelSurface::new(128, 64, PixelEncoding::PackedColumnMajor1Bit);
        let bar = ProgressBar::snap(128, 64, 0, 0, 40, 8);
        bar.draw_fill(&mut s, 0, PixelValue::ON);
        assert_eq!(s.count_set(), 0);
    }

    #[test]
    fn test_dash_stops_before_right_border() {
        let mut s = PixelSurface::new(128, 64, PixelEncoding::PackedColumnMajor1Bit);
        let bar = ProgressBar::snap(128, 64, 2, 4, 75, 12);
        let drawn = ProgressSteps::new(95)
            .filter(|&k| bar.draw_dash(&mut s, k, PixelValue::ON))
            .count();
        assert_eq!(drawn, 8);
        assert!(!s.is_set(16 + 74, 32 + 2));
    }

    #[test]
    fn test_huge_bar_is_clipped() {
        let mut s = PixelSurface::new(128, 64, PixelEncoding::PackedColumnMajor1Bit);
        let bar = ProgressBar::snap(128, 64, 2, 2, i32::MAX, 8);
        bar.draw_border(&mut s, PixelValue::ON);
        assert!(ProgressSteps::new(50).all(|k| bar.draw_dash(&mut s, k, PixelValue::ON)));
        assert!(s.is_set(127, 16));
        assert!(!s.is_set(16, 24));

        let bar = ProgressBar::snap(128, 64, 0, 0, 40, i32::MIN);
        bar.draw_fill(&mut s, 96, PixelValue::ON);
        bar.draw_border(&mut s, PixelValue::ON);
        assert!(!s.is_set(2, 2));
    }
}
