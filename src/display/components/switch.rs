/*
 *  display/components/switch.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Toggle switch icon
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

use crate::constants::TEXT_SIZE;
use crate::display::color::PixelValue;
use crate::display::surface::PixelSurface;

const BODY_WIDTH: f32 = 16.0;
const BODY_HEIGHT: f32 = 32.0;
const GAP: f32 = 6.0;

/// Above this scale the state is labelled with a glyph instead of a dot
pub const GLYPH_SCALE: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchColors {
    pub body: PixelValue,
    pub background: PixelValue,
    pub toggle: PixelValue,
}

/// Pixel geometry of a switch, every length truncated from `scale`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchGeometry {
    pub body_width: i32,
    pub body_height: i32,
    pub gap: i32,
    pub state_size: i32,
}

impl SwitchGeometry {
    pub fn new(scale: f32) -> Self {
        let scale = scale.max(0.0);
        let body_width = (BODY_WIDTH * scale) as i32;
        let gap = (GAP * scale) as i32;
        Self {
            body_width,
            body_height: (BODY_HEIGHT * scale) as i32,
            gap,
            state_size: body_width - gap,
        }
    }
}

/// Draw a switch with its top-left corner at (x, y)
pub fn draw_switch(
    surface: &mut PixelSurface,
    x: i32,
    y: i32,
    on: bool,
    scale: f32,
    colors: &SwitchColors,
) {
    let g = SwitchGeometry::new(scale);
    let bg_x = x.saturating_add(g.body_width / 2 - g.state_size / 2);
    let dot_x = x.saturating_add(g.body_width / 2);
    let half_glyph = TEXT_SIZE / 2;

    surface.fill_rect(x, y, g.body_width, g.body_height, colors.body);

    if on {
        let bg_y = y.saturating_add(g.gap / 2);
        let dot_y = bg_y.saturating_add(g.state_size / 2);
        surface.fill_rect(bg_x, bg_y, g.state_size, g.state_size, colors.background);
        if scale <= GLYPH_SCALE {
            surface.set_pixel(dot_x.saturating_sub(1), dot_y.saturating_sub(1), colors.toggle);
            surface.set_pixel(dot_x, dot_y.saturating_sub(1), colors.toggle);
        } else {
            surface.draw_glyph('I', dot_x.saturating_sub(half_glyph), dot_y.saturating_sub(half_glyph), colors.toggle);
        }
    } else {
        let bottom = y
            .saturating_add(g.body_height)
            .saturating_sub(g.state_size)
            .saturating_sub(g.gap / 2);
        let mid = bottom.saturating_add(g.state_size / 2);
        surface.fill_rect(bg_x, bottom, g.state_size, g.state_size, colors.background);
        if scale <= GLYPH_SCALE {
            surface.set_pixel(dot_x.saturating_sub(1), mid, colors.toggle);
            surface.set_pixel(dot_x, mid, colors.toggle);
        } else {
            surface.draw_glyph('0', dot_x.saturating_sub(half_glyph), mid.saturating_sub(half_glyph), colors.toggle);
        }
    }
}
