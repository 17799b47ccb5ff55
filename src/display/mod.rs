/*
 *  display/mod.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - surfaces, devices and the compositor
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod surface;
pub mod factory;
pub mod color;

// Drawing
pub mod components;
pub mod compositor;

// Panel-less collaborators
pub mod mock;
pub mod sinks;
pub mod timing;

// Re-exports for convenience
pub use traits::{Button, ButtonInput, EdgeButtons, Transfer};
pub use error::DisplayError;
pub use surface::{PixelEncoding, PixelSurface};
pub use factory::{DeviceDescriptor, DeviceFactory, DeviceInfo};
pub use color::{ColorSemantics, ColorTheme, Palette, PixelValue, ThemeRole};
pub use components::{GearAnimation, GearFrame, ProgressSteps, ChargingPulse, TextAlign};
pub use compositor::{Compositor, CompositorOptions};
pub use mock::{MockButtons, MockTransfer};
pub use sinks::{NullTransfer, PnmDumpTransfer};
pub use timing::{RecordingDelay, ThreadDelay};
