/*
 *  main.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Demo: replays every drawing operation on the configured device
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

use anyhow::{Context, Result};
use embedded_hal::delay::DelayNs;
use env_logger::Env;
use log::{info, warn};

use monodisp::config;
use monodisp::display::{
    Compositor, DeviceFactory, NullTransfer, PnmDumpTransfer, TextAlign, ThreadDelay, Transfer,
};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

const SWITCHES: [(i32, bool, f32); 8] = [
    (2, false, 0.4),
    (10, true, 0.6),
    (21, false, 0.8),
    (35, true, 1.0),
    (53, false, 1.2),
    (74, true, 1.4),
    (98, false, 1.6),
    (125, true, 2.2),
];

fn demo<T: Transfer, D: DelayNs>(
    display: &mut Compositor<T, D>,
    pause_ms: u32,
    rotate_deg: u16,
    align: TextAlign,
) {
    let mut pause = ThreadDelay;
    let info = display.device_info();

    // device banner
    display.log("", align);
    display.log("", align);
    display.log(info.driver_chip, align);
    display.log(info.resolution.as_str(), align);
    pause.delay_ms(pause_ms);
    display.log("", align);

    for step in 0..16 {
        match step {
            1..=4 => display.log("left", TextAlign::Left),
            6..=9 => display.log("right", TextAlign::Right),
            11..=14 => display.log("center", TextAlign::Center),
            _ => {}
        }
    }
    pause.delay_ms(pause_ms);

    display.flush_frame();
    for (x, on, scale) in SWITCHES {
        display.draw_switch(x, 4, on, scale);
        display.show();
    }
    pause.delay_ms(pause_ms);

    for n in 0..10u8 {
        display.flush_frame();
        display.trace(f32::from(n + 1), f32::from(n) / 2.0, f32::from(n), 1000, true);
        display.show();
    }
    pause.delay_ms(pause_ms);

    display.flush_frame();
    display.progressbar(2, 2, 40, 8, 65, true);
    display.progressbar(2, 4, 75, 12, 95, false);
    pause.delay_ms(pause_ms);

    display.flush_frame();
    display.draw_save_glyph(32, 32);
    if rotate_deg != 0 {
        if display.rotate(i32::from(rotate_deg)) {
            display.show();
        } else {
            warn!("{} cannot rotate its buffer", info.name);
        }
    }
    pause.delay_ms(pause_ms);

    display.flush_frame();
    display.draw_battery_state(4, 4, false, 60.0, 1.0);
    let bars = display.draw_rssi(40, 4, -65, 1.0);
    info!("rssi -65 dBm: {} bars", bars);
    display.show();
    display.draw_battery_state(4, 24, true, 30.0, 1.0);
    pause.delay_ms(pause_ms);

    display.flush_frame();
    let (w, h) = display.resolution();
    display.render_gear(w as i32 / 2, h as i32 / 2, 30, 16, 6, 4, 10);
}

fn main() -> Result<()> {
    let (cfg, cli) = config::load().context("loading configuration")?;

    if cli.dump_config {
        println!("{}", config::dump(&cfg)?);
        return Ok(());
    }

    let level = if cli.debug { "debug" } else { cfg.log_level.as_deref().unwrap_or("info") };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    info!("This is {}", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    if cli.list_devices {
        for d in DeviceFactory::devices() {
            println!("{:<16} {:>3}x{:<3}  {:?}  {}", d.name, d.width, d.height, d.encoding, d.driver_chip);
        }
        return Ok(());
    }

    let device = cfg.device_name().to_string();
    let descriptor = DeviceFactory::descriptor(&device, false)?;
    let transfer: Box<dyn Transfer> = match cli.dump_dir.as_ref() {
        Some(dir) => {
            info!("Dumping frames to {}", dir.display());
            Box::new(PnmDumpTransfer::new(dir, &descriptor)?)
        }
        None => Box::new(NullTransfer),
    };

    let mut display = Compositor::new(&device, cfg.compositor_options(), transfer, ThreadDelay)
        .with_context(|| format!("attaching {device}"))?;

    demo(&mut display, cli.pause_ms, cfg.rotate_deg(), cfg.log_align());
    display.clear();
    info!("demo complete");
    Ok(())
}
