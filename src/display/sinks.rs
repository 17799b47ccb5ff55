/*
 *  display/sinks.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Transfer sinks without a panel: discard, or dump frames as PBM/PPM
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

use embedded_graphics::pixelcolor::RgbColor;
use log::debug;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::display::color::PixelValue;
use crate::display::error::DisplayError;
use crate::display::factory::DeviceDescriptor;
use crate::display::surface::PixelSurface;
use crate::display::traits::Transfer;

/// Accepts and drops every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTransfer;

impl Transfer for NullTransfer {
    fn transfer(&mut self, _buffer: &[u8]) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Writes each frame to `dir/frame_NNNNN.pbm` (1-bit) or `.ppm` (RGB565)
#[derive(Debug, Clone)]
pub struct PnmDumpTransfer {
    dir: PathBuf,
    descriptor: DeviceDescriptor,
    frame: usize,
}

impl PnmDumpTransfer {
    /// Create the sink, making `dir` if needed.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when `dir` names an existing non-directory,
    /// `Io` when it cannot be created.
    pub fn new(dir: impl AsRef<Path>, descriptor: &DeviceDescriptor) -> Result<Self, DisplayError> {
        let dir = dir.as_ref().to_path_buf();
        if dir.exists() && !dir.is_dir() {
            return Err(DisplayError::InvalidConfiguration(format!(
                "dump target {} is not a directory",
                dir.display()
            )));
        }
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, descriptor: descriptor.clone(), frame: 0 })
    }

    pub fn frames_written(&self) -> usize {
        self.frame
    }

    fn write_pbm(out: &mut impl Write, surface: &PixelSurface) -> std::io::Result<()> {
        writeln!(out, "P1")?;
        writeln!(out, "{} {}", surface.width(), surface.height())?;
        for y in 0..surface.height() as i32 {
            let row: Vec<&str> = (0..surface.width() as i32)
                .map(|x| if surface.is_set(x, y) { "1" } else { "0" })
                .collect();
            writeln!(out, "{}", row.join(" "))?;
        }
        Ok(())
    }

    fn write_ppm(out: &mut impl Write, surface: &PixelSurface) -> std::io::Result<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", surface.width(), surface.height())?;
        writeln!(out, "255")?;
        for y in 0..surface.height() as i32 {
            for x in 0..surface.width() as i32 {
                let c = surface.pixel(x, y).unwrap_or(PixelValue::OFF).to_rgb565();
                let (r, g, b) = (c.r(), c.g(), c.b());
                write!(out, "{} {} {} ", r << 3 | r >> 2, g << 2 | g >> 4, b << 3 | b >> 2)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl Transfer for PnmDumpTransfer {
    fn transfer(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        let d = &self.descriptor;
        let surface = PixelSurface::from_raw(d.width, d.height, d.encoding, buffer.to_vec())?;
        let ext = if d.encoding.is_mono() { "pbm" } else { "ppm" };
        let path = self.dir.join(format!("frame_{:05}.{}", self.frame, ext));

        let mut out = BufWriter::new(File::create(&path)?);
        if d.encoding.is_mono() {
            Self::write_pbm(&mut out, &surface)?;
        } else {
            Self::write_ppm(&mut out, &surface)?;
        }
        out.flush()?;

        debug!("wrote {}", path.display());
        self.frame += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::factory::DeviceFactory;

    #[test]
    fn test_pbm_dump() {
        let dir = std::env::temp_dir().join(format!("monodisp-pbm-{}", std::process::id()));
        let desc = DeviceFactory::descriptor("nokia_5110", false).unwrap();
        let mut sink = PnmDumpTransfer::new(&dir, &desc).unwrap();

        let mut surface = DeviceFactory::surface_for(&desc);
        surface.set_pixel(0, 0, PixelValue::ON);
        sink.transfer(surface.as_bytes()).unwrap();

        let text = fs::read_to_string(dir.join("frame_00000.pbm")).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P1"));
        assert_eq!(lines.next(), Some("84 48"));
        assert!(lines.next().unwrap().starts_with("1 0 0"));
        assert_eq!(sink.frames_written(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_wrong_size_rejected() {
        let dir = std::env::temp_dir().join(format!("monodisp-bad-{}", std::process::id()));
        let desc = DeviceFactory::descriptor("st7735_128x160", false).unwrap();
        let mut sink = PnmDumpTransfer::new(&dir, &desc).unwrap();
        assert!(matches!(
            sink.transfer(&[0; 16]),
            Err(DisplayError::BufferSizeMismatch { .. })
        ));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_dump_target_must_be_directory() {
        let file = std::env::temp_dir().join(format!("monodisp-file-{}", std::process::id()));
        fs::write(&file, b"not a directory").unwrap();
        let desc = DeviceFactory::descriptor("st7920", false).unwrap();
        assert!(matches!(
            PnmDumpTransfer::new(&file, &desc),
            Err(DisplayError::InvalidConfiguration(_))
        ));
        let _ = fs::remove_file(&file);
    }
}
