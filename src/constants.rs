/*
 *  constants.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
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

/// Width and height of a built-in glyph, also the text cell size.
pub const TEXT_SIZE: i32 = 8;

/// Scroll history keeps this many pages of log lines.
pub const HISTORY_PAGES: usize = 8;

/// Horizontal margin (both sides together) and vertical divisor of a trace plot.
pub const TRACE_SCALE_OFFSET: i32 = 20;

/// Left margin of a trace plot.
pub const TRACE_LEFT_MARGIN: f32 = 10.0;

/// Inset between a progress bar border and its fill.
pub const PROGRESS_BORDER: i32 = 2;

/// Progress animations advance this many percent per frame.
pub const PROGRESS_STEP: usize = 8;

/// Battery charging pulse frame time.
pub const CHARGING_STEP_MS: u32 = 500;

/// Number of bars in battery and RSSI glyphs.
pub const GLYPH_BARS: u8 = 4;

/// Slow mode: transfer every n-th line while the page is filling.
pub const SLOW_MODE_FILL_BATCH: usize = 4;

/// Slow mode: transfer every n-th line once the page is full.
pub const SLOW_MODE_FULL_BATCH: usize = 8;

/// Number of alternating full frames in an e-paper erase cycle.
pub const EPAPER_ERASE_FRAMES: usize = 4;

/// Side of the fixed save icon.
pub const SAVE_GLYPH_SIZE: u32 = 32;
