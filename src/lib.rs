/*
 *  lib.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Packed pixel surfaces and a device agnostic compositor for character
 *  and graphics LCDs, OLEDs, e-paper and a color TFT
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

pub mod config;
pub mod constants;
pub mod display;
pub mod font8x8;
pub mod glyphs;

pub use display::{
    Compositor, DeviceDescriptor, DeviceFactory, DisplayError, PixelEncoding, PixelSurface,
    PixelValue, TextAlign,
};
