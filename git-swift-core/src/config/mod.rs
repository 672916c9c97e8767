pub mod keys;

use crate::constants::APP_NAME;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub use keys::{Command, KeysConfig};

pub const DEFAULT_MAX_HEIGHT: u16 = 15;

pub fn config_dir() -> Result<PathBuf> {
    // Use ~/.config on both Linux and macOS (not ~/Library/Application Support)
    #[cfg(unix)]
    {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config_home.is_empty()
        {
            return Ok(PathBuf::from(xdg_config_home).join(APP_NAME));
        }
        Ok(dirs::home_dir()
            .context("Unable to find home directory")?
            .join(".config")
            .join(APP_NAME))
    }
    #[cfg(windows)]
    {
        Ok(dirs::config_dir()
            .context("Unable to find config directory")?
            .join(APP_NAME))
    }
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Everything in the file is optional; an empty file is the default config.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub log: LogConfig,

    /// Color theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Key binding configuration.
    /// To unbind an inherited key mapping, assign it to `noop`.
    #[serde(default)]
    pub keys: KeysConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    /// Maximum number of terminal rows the picker may take up (default: 15).
    /// The picker renders inline below the prompt and shrinks to fit short lists.
    #[serde(default = "UiConfig::default_max_height")]
    pub max_height: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

impl UiConfig {
    fn default_max_height() -> u16 {
        DEFAULT_MAX_HEIGHT
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    pub const fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Off => log::LevelFilter::Off,
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(format!(
                "invalid log level '{s}': expected off, error, warn, info, debug or trace"
            )),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Log file verbosity (default: "warn"). The log lives in the cache directory,
    /// e.g. `~/.cache/git-swift/git-swift.log`.
    #[serde(default)]
    pub level: LogLevel,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Search prompt and key hints (default: "#87ceeb").
    #[serde(
        default = "ThemeConfig::default_prompt",
        deserialize_with = "deserialize_color"
    )]
    pub prompt: ThemeColor,
    /// Characters matched by the query (default: "cyan").
    #[serde(
        default = "ThemeConfig::default_matched",
        deserialize_with = "deserialize_color"
    )]
    pub matched: ThemeColor,
    /// Row under the cursor (default: "#87ceeb").
    #[serde(
        default = "ThemeConfig::default_selected",
        deserialize_with = "deserialize_color"
    )]
    pub selected: ThemeColor,
    /// The checked-out branch (default: "#d0d0d0").
    #[serde(
        default = "ThemeConfig::default_current",
        deserialize_with = "deserialize_color"
    )]
    pub current: ThemeColor,
    /// Row numbers, other branches and help text (default: "#6c6c6c").
    #[serde(
        default = "ThemeConfig::default_muted",
        deserialize_with = "deserialize_color"
    )]
    pub muted: ThemeColor,
    /// Error color (default: "red").
    #[serde(
        default = "ThemeConfig::default_error",
        deserialize_with = "deserialize_color"
    )]
    pub error: ThemeColor,
    /// Warning color (default: "yellow").
    #[serde(
        default = "ThemeConfig::default_warning",
        deserialize_with = "deserialize_color"
    )]
    pub warning: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            prompt: Self::default_prompt(),
            matched: Self::default_matched(),
            selected: Self::default_selected(),
            current: Self::default_current(),
            muted: Self::default_muted(),
            error: Self::default_error(),
            warning: Self::default_warning(),
        }
    }
}

impl ThemeConfig {
    fn default_prompt() -> ThemeColor {
        ThemeColor::Rgb(0x87, 0xce, 0xeb)
    }
    fn default_matched() -> ThemeColor {
        ThemeColor::Named(NamedColor::Cyan)
    }
    fn default_selected() -> ThemeColor {
        ThemeColor::Rgb(0x87, 0xce, 0xeb)
    }
    fn default_current() -> ThemeColor {
        ThemeColor::Rgb(0xd0, 0xd0, 0xd0)
    }
    fn default_muted() -> ThemeColor {
        ThemeColor::Rgb(0x6c, 0x6c, 0x6c)
    }
    fn default_error() -> ThemeColor {
        ThemeColor::Named(NamedColor::Red)
    }
    fn default_warning() -> ThemeColor {
        ThemeColor::Named(NamedColor::Yellow)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl NamedColor {
    /// All named colours in alphabetical order, as accepted by the config parser.
    pub const fn all() -> &'static [(&'static str, NamedColor)] {
        &[
            ("black", NamedColor::Black),
            ("blue", NamedColor::Blue),
            ("cyan", NamedColor::Cyan),
            ("gray", NamedColor::Gray),
            ("green", NamedColor::Green),
            ("magenta", NamedColor::Magenta),
            ("red", NamedColor::Red),
            ("white", NamedColor::White),
            ("yellow", NamedColor::Yellow),
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Gray => "gray",
        }
    }
}

impl std::fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(n) => f.write_str(n.as_str()),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl ThemeColor {
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#')
            && hex.len() == 6
            && hex.is_ascii()
        {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Self::Rgb(r, g, b));
        }
        let lower = s.to_lowercase();
        let lookup = match lower.as_str() {
            "grey" => "gray",
            other => other,
        };
        NamedColor::all()
            .iter()
            .find(|(name, _)| *name == lookup)
            .map(|(_, color)| Self::Named(*color))
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<ThemeColor, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ThemeColor::parse(&s).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid color '{s}': expected a named color (black, red, green, yellow, blue, magenta, cyan, white, gray/grey) or hex (#rrggbb)"
        ))
    })
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    Ok(config)
}

/// Load the config file. A missing default file means defaults; a missing
/// explicit override is an error.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let config_file = match config_override {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let path = config_file()?;
            if !path.exists() {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            path
        }
    };
    let contents = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed to read {}", config_file.display()))?;
    let config = load_config_from_str(&contents)
        .with_context(|| format!("Invalid config file {}", config_file.display()))?;
    Ok(config)
}
