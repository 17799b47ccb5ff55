/*
 *  display/color.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Pixel values, ink semantics and the optional color theme
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

use embedded_graphics::pixelcolor::{BinaryColor, PixelColor, Rgb565, RgbColor};
use log::warn;

use crate::display::factory::DeviceDescriptor;

/// Concrete value written into a surface
///
/// `Mono` is the raw bit stored in a 1-bit buffer, *before* any ink
/// semantics; `Color` is a 16-bit color. Either kind can be written to any
/// surface: mono values become white/black on RGB565, and any non-black
/// color sets the bit on 1-bit surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelValue {
    Mono(bool),
    Color(Rgb565),
}

impl PixelValue {
    pub const ON: PixelValue = PixelValue::Mono(true);
    pub const OFF: PixelValue = PixelValue::Mono(false);

    /// Bit this value stores in a 1-bit buffer
    pub fn is_set(&self) -> bool {
        match self {
            PixelValue::Mono(bit) => *bit,
            PixelValue::Color(c) => *c != Rgb565::BLACK,
        }
    }

    /// Color this value stores in an RGB565 buffer
    pub fn to_rgb565(&self) -> Rgb565 {
        match self {
            PixelValue::Mono(true) => Rgb565::WHITE,
            PixelValue::Mono(false) => Rgb565::BLACK,
            PixelValue::Color(c) => *c,
        }
    }
}

// No raw representation: surfaces pack the value themselves.
impl PixelColor for PixelValue {
    type Raw = ();
}

impl From<BinaryColor> for PixelValue {
    fn from(c: BinaryColor) -> Self {
        PixelValue::Mono(c.is_on())
    }
}

impl From<Rgb565> for PixelValue {
    fn from(c: Rgb565) -> Self {
        PixelValue::Color(c)
    }
}

/// The two logical inks of a device, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSemantics {
    pub colored: PixelValue,
    pub uncolored: PixelValue,
}

impl ColorSemantics {
    /// Ink pair for a device: mono panels draw with bit 1 unless the panel
    /// has inverted logic (e-paper), color panels draw white on black; the
    /// `inverted` flag swaps either pair.
    pub fn for_device(descriptor: &DeviceDescriptor) -> Self {
        let (colored, uncolored) = if descriptor.color_capable {
            (PixelValue::Color(Rgb565::WHITE), PixelValue::Color(Rgb565::BLACK))
        } else {
            let ink = !descriptor.inverted_logic;
            (PixelValue::Mono(ink), PixelValue::Mono(!ink))
        };
        if descriptor.inverted {
            Self { colored: uncolored, uncolored: colored }
        } else {
            Self { colored, uncolored }
        }
    }

    pub fn ink(&self, colored: bool) -> PixelValue {
        if colored { self.colored } else { self.uncolored }
    }
}

/// Semantic roles a theme assigns colors to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeRole {
    Trace,
    CircleOutline,
    CircleFill,
    SwitchBody,
    SwitchToggle,
    SwitchBackground,
    Text,
    ProgressBorder,
    ProgressFill,
    Rssi,
    Battery,
    Background,
}

impl ThemeRole {
    /// Whether the role falls back to COLORED (true) or UNCOLORED ink
    pub fn default_ink(&self) -> bool {
        !matches!(self, ThemeRole::SwitchBackground | ThemeRole::Background)
    }
}

/// Concrete colors per role for color-capable panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTheme {
    pub trace: Rgb565,
    pub circle_outline: Rgb565,
    pub circle_fill: Rgb565,
    pub switch_body: Rgb565,
    pub switch_toggle: Rgb565,
    pub switch_background: Rgb565,
    pub text: Rgb565,
    pub progress_border: Rgb565,
    pub progress_fill: Rgb565,
    pub rssi: Rgb565,
    pub battery: Rgb565,
    pub background: Rgb565,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            trace: Rgb565::GREEN,
            circle_outline: Rgb565::WHITE,
            circle_fill: Rgb565::CYAN,
            switch_body: Rgb565::new(12, 25, 12),
            switch_toggle: Rgb565::WHITE,
            switch_background: Rgb565::BLACK,
            text: Rgb565::WHITE,
            progress_border: Rgb565::WHITE,
            progress_fill: Rgb565::GREEN,
            rssi: Rgb565::CYAN,
            battery: Rgb565::YELLOW,
            background: Rgb565::BLACK,
        }
    }
}

impl ColorTheme {
    pub fn color(&self, role: ThemeRole) -> Rgb565 {
        match role {
            ThemeRole::Trace => self.trace,
            ThemeRole::CircleOutline => self.circle_outline,
            ThemeRole::CircleFill => self.circle_fill,
            ThemeRole::SwitchBody => self.switch_body,
            ThemeRole::SwitchToggle => self.switch_toggle,
            ThemeRole::SwitchBackground => self.switch_background,
            ThemeRole::Text => self.text,
            ThemeRole::ProgressBorder => self.progress_border,
            ThemeRole::ProgressFill => self.progress_fill,
            ThemeRole::Rssi => self.rssi,
            ThemeRole::Battery => self.battery,
            ThemeRole::Background => self.background,
        }
    }
}

/// Resolves roles to pixel values for one device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    semantics: ColorSemantics,
    theme: Option<ColorTheme>,
}

impl Palette {
    /// A theme is only honored on color-capable devices.
    pub fn new(descriptor: &DeviceDescriptor, theme: Option<ColorTheme>) -> Self {
        let theme = match theme {
            Some(_) if !descriptor.color_capable => {
                warn!("{} is monochrome, ignoring color theme", descriptor.name);
                None
            }
            t => t,
        };
        Self { semantics: ColorSemantics::for_device(descriptor), theme }
    }

    pub fn semantics(&self) -> &ColorSemantics {
        &self.semantics
    }

    pub fn theme(&self) -> Option<&ColorTheme> {
        self.theme.as_ref()
    }

    pub fn colored(&self) -> PixelValue {
        self.semantics.colored
    }

    pub fn uncolored(&self) -> PixelValue {
        self.semantics.uncolored
    }

    pub fn resolve(&self, role: ThemeRole) -> PixelValue {
        match &self.theme {
            Some(theme) => PixelValue::Color(theme.color(role)),
            None => self.semantics.ink(role.default_ink()),
        }
    }
}
