/*
 *  display/components/text_page.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Bounded text log, scroll-back history and the scroll window
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

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::ops::Range;

use crate::constants::TEXT_SIZE;
use crate::display::color::PixelValue;
use crate::display::surface::PixelSurface;

/// Horizontal placement of a log line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Left edge for a line of `chars` 8 pixel glyphs
    pub fn x_for(self, surface_width: u32, chars: usize) -> i32 {
        let text_width = i32::try_from(chars).unwrap_or(i32::MAX).saturating_mul(TEXT_SIZE);
        match self {
            TextAlign::Left => 0,
            TextAlign::Center => surface_width as i32 / 2 - text_width / 2,
            TextAlign::Right => surface_width as i32 - text_width,
        }
    }
}

/// Fixed capacity FIFO of log lines, oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPage {
    lines: VecDeque<String>,
    capacity: usize,
    max_line_width: usize,
}

impl TextPage {
    pub fn new(capacity: usize, max_line_width: usize) -> Self {
        Self { lines: VecDeque::with_capacity(capacity), capacity, max_line_width }
    }

    /// Append `text`, split once when longer than the line width.
    ///
    /// Each part evicts the oldest line on its own when the page is full, so
    /// the tail of an over-long text is never wrapped a second time.
    pub fn push(&mut self, text: &str) {
        match text.char_indices().nth(self.max_line_width) {
            Some((at, _)) => {
                let (head, tail) = text.split_at(at);
                self.push_line(head);
                self.push_line(tail);
            }
            None => self.push_line(text),
        }
    }

    fn push_line(&mut self, line: &str) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.to_string());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lines.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_line_width(&self) -> usize {
        self.max_line_width
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Lines within `range`, clipped to what is held
    pub fn slice(&self, range: Range<usize>) -> impl Iterator<Item = &str> {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        self.lines.range(start..end).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Offset of the visible slice into the scroll history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollWindow {
    offset: usize,
    window: usize,
}

impl ScrollWindow {
    pub fn new(window: usize) -> Self {
        Self { offset: 0, window }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Apply one poll of the buttons: up moves forward, down back, never
    /// below zero. Only the visible slice is bounded by the history.
    pub fn step(&mut self, up: bool, down: bool) {
        if up {
            self.offset = self.offset.saturating_add(1);
        }
        if down {
            self.offset = self.offset.saturating_sub(1);
        }
    }

    pub fn visible(&self, history_len: usize) -> Range<usize> {
        let start = self.offset.min(history_len);
        start..(start + self.window).min(history_len)
    }
}

/// Render lines top to bottom, one 8 pixel row each
pub fn render_lines<'a>(
    surface: &mut PixelSurface,
    lines: impl Iterator<Item = &'a str>,
    align: TextAlign,
    value: PixelValue,
) {
    let width = surface.width();
    for (i, line) in lines.enumerate() {
        let x = align.x_for(width, line.chars().count());
        surface.draw_text(line, x, i as i32 * TEXT_SIZE, value);
    }
}
