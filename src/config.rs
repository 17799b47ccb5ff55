use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::display::{ColorTheme, CompositorOptions, DeviceFactory, TextAlign};

/// Device used when neither the YAML nor the CLI names one.
pub const DEFAULT_DEVICE: &str = "ssd1306_128x64";

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DisplayConfig {
    pub device: Option<String>,        // e.g. "sh1106_128x64"
    pub inverted: Option<bool>,
    pub slow_mode: Option<bool>,       // e-paper only
    pub scroll_history: Option<bool>,
    pub rotate_deg: Option<u16>,
    pub align: Option<TextAlign>,      // left | center | right
    pub theme: Option<ThemeConfig>,    // color panels only
}

/// Role colors as raw RGB565 values, e.g. `0x07E0` for green.
/// Missing roles keep the default theme color.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ThemeConfig {
    pub trace: Option<u16>,
    pub circle_outline: Option<u16>,
    pub circle_fill: Option<u16>,
    pub switch_body: Option<u16>,
    pub switch_toggle: Option<u16>,
    pub switch_background: Option<u16>,
    pub text: Option<u16>,
    pub progress_border: Option<u16>,
    pub progress_fill: Option<u16>,
    pub rssi: Option<u16>,
    pub battery: Option<u16>,
    pub background: Option<u16>,
}

impl ThemeConfig {
    pub fn to_theme(&self) -> ColorTheme {
        let pick = |raw: Option<u16>, fallback: Rgb565| raw.map_or(fallback, |v| Rgb565::from(RawU16::new(v)));
        let d = ColorTheme::default();
        ColorTheme {
            trace: pick(self.trace, d.trace),
            circle_outline: pick(self.circle_outline, d.circle_outline),
            circle_fill: pick(self.circle_fill, d.circle_fill),
            switch_body: pick(self.switch_body, d.switch_body),
            switch_toggle: pick(self.switch_toggle, d.switch_toggle),
            switch_background: pick(self.switch_background, d.switch_background),
            text: pick(self.text, d.text),
            progress_border: pick(self.progress_border, d.progress_border),
            progress_fill: pick(self.progress_fill, d.progress_fill),
            rssi: pick(self.rssi, d.rssi),
            battery: pick(self.battery, d.battery),
            background: pick(self.background, d.background),
        }
    }
}

impl Config {
    pub fn device_name(&self) -> &str {
        self.display
            .as_ref()
            .and_then(|d| d.device.as_deref())
            .unwrap_or(DEFAULT_DEVICE)
    }

    pub fn rotate_deg(&self) -> u16 {
        self.display.as_ref().and_then(|d| d.rotate_deg).unwrap_or(0)
    }

    /// Alignment of plain log lines
    pub fn log_align(&self) -> TextAlign {
        self.display.as_ref().and_then(|d| d.align).unwrap_or_default()
    }

    /// Construction settings for the compositor
    pub fn compositor_options(&self) -> CompositorOptions {
        let Some(d) = self.display.as_ref() else {
            return CompositorOptions::default();
        };
        CompositorOptions {
            inverted: d.inverted.unwrap_or(false),
            slow_mode: d.slow_mode.unwrap_or(false),
            scroll_history: d.scroll_history.unwrap_or(false),
            theme: d.theme.as_ref().map(ThemeConfig::to_theme),
        }
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "monodisp", version, about = "monodisp - one API for small displays")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// device name, see --list-devices
    #[arg(long)]
    pub device: Option<String>,
    #[arg(long, action = ArgAction::Set)]
    pub inverted: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub slow_mode: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub scroll_history: Option<bool>,
    #[arg(long)]
    pub rotate_deg: Option<u16>,
    /// alignment of plain log lines
    #[arg(long, value_enum)]
    pub align: Option<TextAlign>,
    /// write every transferred frame as PBM/PPM into this directory
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub dump_dir: Option<PathBuf>,
    /// pause between demo sections
    #[arg(long, default_value_t = 0)]
    pub pause_ms: u32,
    /// debug logging
    #[arg(short = 'v', long = "debug", action = ArgAction::SetTrue)]
    pub debug: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
    /// list supported devices and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub list_devices: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<(Config, Cli), ConfigError> {
    let cli = Cli::parse();
    let cfg = load_from(&cli)?;
    Ok((cfg, cli))
}

/// Build the effective config for an already parsed command line.
pub fn load_from(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Pretty YAML of the effective config
pub fn dump(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/monodisp/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/monodisp/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/monodisp.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["monodisp.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some()      { dst.log_level = src.log_level; }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.device.is_some()          { dst.device = src.device; }
    if src.inverted.is_some()        { dst.inverted = src.inverted; }
    if src.slow_mode.is_some()       { dst.slow_mode = src.slow_mode; }
    if src.scroll_history.is_some()  { dst.scroll_history = src.scroll_history; }
    if src.rotate_deg.is_some()      { dst.rotate_deg = src.rotate_deg; }
    if src.align.is_some()           { dst.align = src.align; }
    if src.theme.is_some()           { dst.theme = src.theme; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()       { cfg.log_level = cli.log_level.clone(); }
    let any_display = cli.device.is_some()
        || cli.inverted.is_some()
        || cli.slow_mode.is_some()
        || cli.scroll_history.is_some()
        || cli.rotate_deg.is_some()
        || cli.align.is_some();

    if any_display && cfg.display.is_none() {
        cfg.display = Some(DisplayConfig::default());
    }
    if let Some(display) = cfg.display.as_mut() {
        if cli.device.is_some()          { display.device = cli.device.clone(); }
        if cli.inverted.is_some()        { display.inverted = cli.inverted; }
        if cli.slow_mode.is_some()       { display.slow_mode = cli.slow_mode; }
        if cli.scroll_history.is_some()  { display.scroll_history = cli.scroll_history; }
        if cli.rotate_deg.is_some()      { display.rotate_deg = cli.rotate_deg; }
        if cli.align.is_some()           { display.align = cli.align; }
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(level) = cfg.log_level.as_deref() {
        if level.parse::<LevelFilter>().is_err() {
            return Err(ConfigError::Validation(format!("unknown log_level: {level}")));
        }
    }
    if let Some(display) = cfg.display.as_ref() {
        if let Some(device) = display.device.as_deref() {
            DeviceFactory::descriptor(device, false)
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
        }
        if let Some(rot) = display.rotate_deg {
            match rot {
                0 | 90 | 180 | 270 => {},
                _ => return Err(ConfigError::Validation("display rotate_deg must be 0|90|180|270".into()))
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["monodisp"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_yaml_display_section() {
        let yaml = "
log_level: debug
display:
  device: 1in54_epd
  slow_mode: true
  theme:
    trace: 2016
";
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.device_name(), "1in54_epd");
        let opts = cfg.compositor_options();
        assert!(opts.slow_mode);
        assert!(!opts.inverted);
        let theme = opts.theme.unwrap();
        assert_eq!(theme.trace, Rgb565::GREEN);
        assert_eq!(theme.battery, Rgb565::YELLOW);
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_cli_overrides_yaml() {
        let mut cfg = Config {
            log_level: Some("info".into()),
            display: Some(DisplayConfig {
                device: Some("st7920".into()),
                inverted: Some(false),
                ..Default::default()
            }),
        };
        apply_cli_overrides(&mut cfg, &cli(&["--device", "nokia_5110", "--inverted", "true"]));
        assert_eq!(cfg.device_name(), "nokia_5110");
        assert!(cfg.compositor_options().inverted);
        assert_eq!(cfg.log_level.as_deref(), Some("info"));
    }

    #[test]
    fn test_align_from_yaml_and_cli() {
        let mut cfg: Config = serde_yaml::from_str("display:\n  align: right\n").unwrap();
        assert_eq!(cfg.log_align(), TextAlign::Right);
        apply_cli_overrides(&mut cfg, &cli(&["--align", "center"]));
        assert_eq!(cfg.log_align(), TextAlign::Center);
        assert_eq!(Config::default().log_align(), TextAlign::Left);
        assert!(serde_yaml::from_str::<Config>("display:\n  align: middle\n").is_err());
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut dst = Config {
            log_level: None,
            display: Some(DisplayConfig { device: Some("st7920".into()), ..Default::default() }),
        };
        let src = Config {
            log_level: Some("warn".into()),
            display: Some(DisplayConfig { rotate_deg: Some(90), ..Default::default() }),
        };
        merge(&mut dst, src);
        assert_eq!(dst.device_name(), "st7920");
        assert_eq!(dst.rotate_deg(), 90);
        assert_eq!(dst.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.device_name(), DEFAULT_DEVICE);
        assert_eq!(cfg.compositor_options(), CompositorOptions::default());
        assert_eq!(cfg.rotate_deg(), 0);
    }

    #[test]
    fn test_validation_errors() {
        let bad_device = Config {
            display: Some(DisplayConfig { device: Some("ili9341".into()), ..Default::default() }),
            ..Default::default()
        };
        assert!(matches!(validate(&bad_device), Err(ConfigError::Validation(_))));

        let bad_rotation = Config {
            display: Some(DisplayConfig { rotate_deg: Some(45), ..Default::default() }),
            ..Default::default()
        };
        assert!(validate(&bad_rotation).is_err());

        let bad_level = Config { log_level: Some("loud".into()), display: None };
        assert!(validate(&bad_level).is_err());
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let c = cli(&["--config", "/nonexistent/monodisp.yaml"]);
        assert!(matches!(load_from(&c), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_dump_round_trips() {
        let cfg = Config {
            log_level: Some("debug".into()),
            display: Some(DisplayConfig { device: Some("st7920".into()), ..Default::default() }),
        };
        let text = dump(&cfg).unwrap();
        let back: Config = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }
}
