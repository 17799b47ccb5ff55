/*
 *  display/components/mod.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Drawing components used by the compositor
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

pub mod battery;
pub mod circle;
pub mod gear;
pub mod progress;
pub mod rssi;
pub mod switch;
pub mod text_page;
pub mod trace;

// Re-exports
pub use battery::{battery_bars, BatteryGlyph, ChargingPulse};
pub use circle::draw_circle;
pub use gear::{GearAnimation, GearFrame};
pub use progress::{ProgressBar, ProgressSteps};
pub use rssi::{draw_rssi, rssi_bars};
pub use switch::{draw_switch, SwitchColors, SwitchGeometry};
pub use text_page::{render_lines, ScrollWindow, TextAlign, TextPage};
pub use trace::{trace_points, TraceParams};
