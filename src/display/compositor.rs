/*
 *  display/compositor.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Device agnostic drawing layer over one surface and one panel
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

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::constants::{
    CHARGING_STEP_MS, EPAPER_ERASE_FRAMES, HISTORY_PAGES, SLOW_MODE_FILL_BATCH,
    SLOW_MODE_FULL_BATCH, TEXT_SIZE,
};
use crate::display::color::{ColorTheme, Palette, PixelValue, ThemeRole};
use crate::display::components::{
    battery_bars, draw_circle, draw_rssi, draw_switch, render_lines, rssi_bars, trace_points,
    BatteryGlyph, ChargingPulse, GearAnimation, GearFrame, ProgressBar, ProgressSteps,
    ScrollWindow, SwitchColors, TextAlign, TextPage, TraceParams,
};
use crate::display::error::DisplayError;
use crate::display::factory::{DeviceDescriptor, DeviceFactory, DeviceInfo};
use crate::display::surface::PixelSurface;
use crate::display::traits::{Button, ButtonInput, Transfer};
use crate::glyphs::save_glyph;

/// Construction time settings, fixed for the compositor's lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositorOptions {
    /// Swap COLORED and UNCOLORED
    pub inverted: bool,

    /// Batch log transfers on slow-refresh panels
    pub slow_mode: bool,

    /// Keep a scroll-back history for `show_scrollable_log`
    pub scroll_history: bool,

    /// Role colors, honored on color-capable panels only
    pub theme: Option<ColorTheme>,
}

/// Drawing layer bound to one device
///
/// Draw calls only touch the surface; `show()` and the animated operations
/// push the buffer through the `Transfer` collaborator. Nothing after a
/// successful `new()` returns an error: geometry is clipped and transfer
/// failures are logged.
pub struct Compositor<T, D> {
    surface: PixelSurface,
    descriptor: DeviceDescriptor,
    palette: Palette,
    page: TextPage,
    history: TextPage,
    scroll: ScrollWindow,
    slow_mode: bool,
    slow_counter: usize,
    transfer: T,
    delay: D,
}

impl<T: Transfer, D: DelayNs> Compositor<T, D> {
    /// Attach to `device`
    ///
    /// # Errors
    ///
    /// `DisplayError::UnsupportedDevice` for a name missing from the device
    /// table.
    pub fn new(
        device: &str,
        options: CompositorOptions,
        transfer: T,
        delay: D,
    ) -> Result<Self, DisplayError> {
        let descriptor = DeviceFactory::descriptor(device, options.inverted)?;
        let surface = DeviceFactory::surface_for(&descriptor);
        let palette = Palette::new(&descriptor, options.theme);

        let max_line_width = (descriptor.width as i32 / TEXT_SIZE) as usize;
        let max_line_number = (descriptor.height as i32 / TEXT_SIZE) as usize;
        let history_capacity = if options.scroll_history { max_line_number * HISTORY_PAGES } else { 0 };

        let slow_mode = match (options.slow_mode, descriptor.slow_refresh) {
            (true, false) => {
                warn!("Slow mode ignored, {} refreshes quickly", descriptor.name);
                false
            }
            (mode, _) => mode,
        };

        info!("Device: {} Init OK", descriptor.name);
        info!("Driver Chip: {}", descriptor.driver_chip);
        info!("Created Buffer size: {}", surface.as_bytes().len());
        info!("Resolution: {}x{}", descriptor.width, descriptor.height);
        info!("Line width: {}", max_line_width);
        info!("Max Lines: {}", max_line_number);

        let mut compositor = Self {
            surface,
            descriptor,
            palette,
            page: TextPage::new(max_line_number, max_line_width),
            history: TextPage::new(history_capacity, max_line_width),
            scroll: ScrollWindow::new(max_line_number),
            slow_mode,
            slow_counter: 0,
            transfer,
            delay,
        };
        if compositor.descriptor.slow_refresh {
            compositor.refresh_epaper();
        }
        Ok(compositor)
    }

    // ---- buffer and transfer -------------------------------------------

    /// Push the surface to the panel now
    pub fn show(&mut self) {
        match self.transfer.transfer(self.surface.as_bytes()) {
            Ok(()) => debug!("show: {} bytes", self.surface.as_bytes().len()),
            Err(e) => warn!("{} transfer failed: {}", self.descriptor.name, e),
        }
    }

    /// Blank the surface without transferring
    pub fn flush_frame(&mut self) {
        self.surface.fill(self.palette.uncolored());
    }

    /// Blank the surface and the panel
    pub fn clear(&mut self) {
        self.flush_frame();
        self.show();
    }

    /// Full erase cycle for e-paper: alternate blank and black frames,
    /// then restore what was drawn. No-op on fast panels.
    pub fn refresh_epaper(&mut self) {
        if !self.descriptor.slow_refresh {
            debug!("refresh_epaper: {} is not e-paper", self.descriptor.name);
            return;
        }
        let snapshot = self.surface.clone();
        for i in 0..EPAPER_ERASE_FRAMES {
            self.surface.fill(PixelValue::Mono(i % 2 == 1));
            self.show();
        }
        self.surface = snapshot;
    }

    pub fn rotate(&mut self, degrees: i32) -> bool {
        self.surface.rotate(degrees)
    }

    // ---- primitives ------------------------------------------------------

    pub fn draw_circle(&mut self, x: i32, y: i32, radius: i32, colored: bool, filled: bool) {
        let outline = if colored {
            self.palette.resolve(ThemeRole::CircleOutline)
        } else {
            self.palette.uncolored()
        };
        let fill = filled.then(|| self.palette.resolve(ThemeRole::CircleFill));
        draw_circle(&mut self.surface, x, y, radius, outline, fill);
    }

    pub fn draw_switch(&mut self, x: i32, y: i32, on: bool, scale: f32) {
        let colors = SwitchColors {
            body: self.palette.resolve(ThemeRole::SwitchBody),
            background: self.palette.resolve(ThemeRole::SwitchBackground),
            toggle: self.palette.resolve(ThemeRole::SwitchToggle),
        };
        draw_switch(&mut self.surface, x, y, on, scale, &colors);
    }

    /// Plot `amplitude * sin(2 pi f t / time_ms - phase)` across the surface
    ///
    /// On 1-bit panels the raw bit is `colored`, flipped on inverted-logic
    /// panels; the `inverted` flag does not apply.
    pub fn trace(&mut self, frequency: f32, phase: f32, amplitude: f32, time_ms: u32, colored: bool) {
        let value = if self.descriptor.color_capable {
            if colored { self.palette.resolve(ThemeRole::Trace) } else { self.palette.uncolored() }
        } else {
            PixelValue::Mono(colored ^ self.descriptor.inverted_logic)
        };
        let params = TraceParams { frequency, phase, amplitude, time_ms };
        for (x, y) in trace_points(self.descriptor.width, self.descriptor.height, params) {
            self.surface.set_pixel(x, y, value);
        }
    }

    /// Bar at text cell (col, row); every step is transferred as drawn.
    pub fn progressbar(&mut self, col: i32, row: i32, width: i32, height: i32, state: i32, filled: bool) {
        let bar = ProgressBar::snap(self.descriptor.width, self.descriptor.height, col, row, width, height);
        bar.draw_border(&mut self.surface, self.palette.resolve(ThemeRole::ProgressBorder));

        let fill = self.palette.resolve(ThemeRole::ProgressFill);
        for k in ProgressSteps::new(state) {
            if filled {
                bar.draw_fill(&mut self.surface, k, fill);
                self.show();
            } else if bar.draw_dash(&mut self.surface, k, fill) {
                self.show();
            }
        }
    }

    /// Battery glyph; `charging` plays the one-shot pulse, which ends with
    /// the glyph area erased.
    pub fn draw_battery_state(&mut self, x: i32, y: i32, charging: bool, state: f32, scale: f32) {
        let glyph = BatteryGlyph::new(scale);
        let ink = self.palette.resolve(ThemeRole::Battery);
        glyph.draw_outline(&mut self.surface, x, y, ink);
        glyph.draw_bars(&mut self.surface, x, y, battery_bars(state), ink);

        if !charging {
            return;
        }
        for bars in ChargingPulse::new() {
            glyph.draw_bars(&mut self.surface, x, y, bars, ink);
            self.show();
            self.delay.delay_ms(CHARGING_STEP_MS);
        }
        glyph.erase(&mut self.surface, x, y, self.palette.resolve(ThemeRole::Background));
        self.show();
    }

    /// Signal bars for `dbm`; returns how many were drawn.
    pub fn draw_rssi(&mut self, x: i32, y: i32, dbm: i32, scale: f32) -> u8 {
        let bars = rssi_bars(dbm);
        draw_rssi(&mut self.surface, x, y, bars, scale, self.palette.resolve(ThemeRole::Rssi));
        bars
    }

    // ---- text --------------------------------------------------------------

    /// Append to the log page, redraw it and transfer
    pub fn log(&mut self, text: &str, align: TextAlign) {
        self.page.push(text);
        self.history.push(text);

        self.flush_frame();
        let ink = self.palette.resolve(ThemeRole::Text);
        render_lines(&mut self.surface, self.page.lines(), align, ink);

        if !self.slow_mode {
            self.show();
        } else if !self.page.is_full() {
            if self.page.len() % SLOW_MODE_FILL_BATCH == 0 {
                self.show();
            }
        } else {
            self.slow_counter += 1;
            if self.slow_counter % SLOW_MODE_FULL_BATCH == 0 {
                self.show();
            }
        }
    }

    /// Poll the buttons once, move the window and render the history slice
    pub fn show_scrollable_log<B: ButtonInput>(&mut self, align: TextAlign, buttons: &mut B) {
        let up = buttons.edge(Button::Up);
        let down = buttons.edge(Button::Down);
        self.scroll.step(up, down);
        let visible = self.scroll.visible(self.history.len());
        debug!("scroll window {:?} of {}", visible, self.history.len());

        self.flush_frame();
        let ink = self.palette.resolve(ThemeRole::Text);
        render_lines(&mut self.surface, self.history.slice(visible), align, ink);
        self.show();
    }

    // ---- animation ---------------------------------------------------------

    /// Draw one gear frame centred on (x, y) on a blank surface
    pub fn draw_gear_frame(&mut self, x: i32, y: i32, frame: &GearFrame) {
        self.flush_frame();
        for v in &frame.vertices {
            self.draw_circle(x.saturating_add(v.x), y.saturating_add(v.y), frame.rad_moving, true, true);
        }
    }

    /// Blocking gear animation: one transfer and one delay per frame
    #[allow(clippy::too_many_arguments)]
    pub fn render_gear(
        &mut self,
        x: i32,
        y: i32,
        frames: u32,
        base_radius: u32,
        points: u32,
        point_radius_max: u32,
        delay_ms: u32,
    ) {
        for frame in GearAnimation::new(frames, base_radius, points, point_radius_max) {
            self.draw_gear_frame(x, y, &frame);
            self.show();
            self.delay.delay_ms(delay_ms);
        }
    }

    /// 32x32 save icon; reverse video on inverted-logic panels
    pub fn draw_save_glyph(&mut self, x: i32, y: i32) {
        let glyph = save_glyph();
        if self.descriptor.inverted_logic {
            self.surface.fill(self.palette.colored());
            self.surface.blit(&glyph, x, y, self.palette.uncolored());
        } else {
            self.surface.blit(&glyph, x, y, self.palette.resolve(ThemeRole::Text));
        }
        self.show();
    }

    // ---- accessors -----------------------------------------------------------

    pub fn resolution(&self) -> (u32, u32) {
        (self.descriptor.width, self.descriptor.height)
    }

    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo::new(&self.descriptor)
    }

    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    /// Direct access for drawing with embedded-graphics
    pub fn surface_mut(&mut self) -> &mut PixelSurface {
        &mut self.surface
    }

    pub fn page(&self) -> &TextPage {
        &self.page
    }

    pub fn history(&self) -> &TextPage {
        &self.history
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll.offset()
    }

    pub fn max_line_width(&self) -> usize {
        self.page.max_line_width()
    }

    pub fn max_line_number(&self) -> usize {
        self.page.capacity()
    }

    pub fn is_slow_mode(&self) -> bool {
        self.slow_mode
    }

    pub fn transfer(&self) -> &T {
        &self.transfer
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn into_parts(self) -> (PixelSurface, T, D) {
        (self.surface, self.transfer, self.delay)
    }
}
