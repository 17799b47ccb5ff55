/*
 *  display/factory.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Device table and construction of descriptors and surfaces
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

use arrayvec::ArrayString;
use core::fmt::Write;
use log::{debug, info};

use crate::display::error::DisplayError;
use crate::display::surface::{PixelEncoding, PixelSurface};

/// Fixed description of one attached panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Name used in configuration, e.g. "ssd1306_128x64"
    pub name: &'static str,

    /// Display width in pixels
    pub width: u32,

    /// Display height in pixels
    pub height: u32,

    /// Human readable controller / module name
    pub driver_chip: &'static str,

    /// Layout of the frame buffer the controller expects
    pub encoding: PixelEncoding,

    /// User requested ink inversion
    pub inverted: bool,

    /// Panel whose ink bit is 0 (e-paper: 1 is white)
    pub inverted_logic: bool,

    /// RGB565 panel, honors color themes
    pub color_capable: bool,

    /// Physical refresh is expensive, slow mode may batch transfers
    pub slow_refresh: bool,
}

const fn mono(
    name: &'static str,
    width: u32,
    height: u32,
    driver_chip: &'static str,
    encoding: PixelEncoding,
) -> DeviceDescriptor {
    DeviceDescriptor {
        name,
        width,
        height,
        driver_chip,
        encoding,
        inverted: false,
        inverted_logic: false,
        color_capable: false,
        slow_refresh: false,
    }
}

static DEVICES: &[DeviceDescriptor] = &[
    mono("st7920", 128, 64, "Generic ST7920", PixelEncoding::PackedRowMajor1Bit),
    mono("nokia_5110", 84, 48, "PCD8544", PixelEncoding::PackedColumnMajor1Bit),
    mono("sh1106_128x64", 128, 64, "Generic SH1106", PixelEncoding::PackedColumnMajor1Bit),
    mono("ssd1309_128x64", 128, 64, "2.42 OLED V1.1", PixelEncoding::PackedColumnMajor1Bit),
    mono("ssd1306_128x64", 128, 64, "Generic SSD1306", PixelEncoding::PackedColumnMajor1Bit),
    DeviceDescriptor {
        inverted_logic: true,
        slow_refresh: true,
        ..mono("1in54_epd", 200, 200, "GDEH0154D27 1.54 inch e-ink device", PixelEncoding::PackedRowMajor1Bit)
    },
    DeviceDescriptor {
        color_capable: true,
        ..mono("st7735_128x160", 128, 160, "Generic ST7735", PixelEncoding::Rgb565)
    },
];

/// Summary reported to callers, resolution pre-formatted as "WxH"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub name: &'static str,
    pub resolution: ArrayString<16>,
    pub driver_chip: &'static str,
    pub buffer_len: usize,
}

impl DeviceInfo {
    pub fn new(descriptor: &DeviceDescriptor) -> Self {
        let mut resolution = ArrayString::new();
        let _ = write!(&mut resolution, "{}x{}", descriptor.width, descriptor.height);
        Self {
            name: descriptor.name,
            resolution,
            driver_chip: descriptor.driver_chip,
            buffer_len: descriptor.encoding.buffer_len(descriptor.width, descriptor.height),
        }
    }
}

/// Factory for device descriptors and their surfaces
pub struct DeviceFactory;

impl DeviceFactory {
    /// All known devices, inversion off
    pub fn devices() -> &'static [DeviceDescriptor] {
        DEVICES
    }

    /// Look up a device by name (case-insensitive)
    ///
    /// # Errors
    ///
    /// `DisplayError::UnsupportedDevice` when the name is not in the table.
    pub fn descriptor(name: &str, inverted: bool) -> Result<DeviceDescriptor, DisplayError> {
        let wanted = name.trim().to_ascii_lowercase();
        let found = DEVICES
            .iter()
            .find(|d| d.name == wanted)
            .ok_or_else(|| DisplayError::UnsupportedDevice(name.to_string()))?;
        debug!("Resolved device {} -> {}", name, found.driver_chip);
        Ok(DeviceDescriptor { inverted, ..found.clone() })
    }

    /// Allocate the surface a device's controller expects
    pub fn surface_for(descriptor: &DeviceDescriptor) -> PixelSurface {
        let surface = PixelSurface::new(descriptor.width, descriptor.height, descriptor.encoding);
        info!(
            "Created {:?} buffer for {}, size: {} bytes",
            descriptor.encoding,
            descriptor.name,
            surface.as_bytes().len()
        );
        surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_device_rejected() {
        match DeviceFactory::descriptor("ili9341", false) {
            Err(DisplayError::UnsupportedDevice(name)) => assert_eq!(name, "ili9341"),
            other => panic!("expected UnsupportedDevice, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let d = DeviceFactory::descriptor("ST7920", true).unwrap();
        assert_eq!(d.name, "st7920");
        assert!(d.inverted);
        assert_eq!(d.encoding, PixelEncoding::PackedRowMajor1Bit);
    }

    #[test]
    fn test_buffer_sizes() {
        let sizes: Vec<(&str, usize)> = DeviceFactory::devices()
            .iter()
            .map(|d| (d.name, DeviceFactory::surface_for(d).as_bytes().len()))
            .collect();
        assert!(sizes.contains(&("st7920", 1024)));
        assert!(sizes.contains(&("nokia_5110", 504)));
        assert!(sizes.contains(&("ssd1306_128x64", 1024)));
        assert!(sizes.contains(&("1in54_epd", 5000)));
        assert!(sizes.contains(&("st7735_128x160", 128 * 160 * 2)));
    }

    #[test]
    fn test_device_info() {
        let d = DeviceFactory::descriptor("nokia_5110", false).unwrap();
        let info = DeviceInfo::new(&d);
        assert_eq!(info.resolution.as_str(), "84x48");
        assert_eq!(info.driver_chip, "PCD8544");
        assert_eq!(info.buffer_len, 504);
    }

    #[test]
    fn test_only_tft_is_color() {
        let color: Vec<_> = DeviceFactory::devices().iter().filter(|d| d.color_capable).collect();
        assert_eq!(color.len(), 1);
        assert_eq!(color[0].encoding, PixelEncoding::Rgb565);
    }
}
