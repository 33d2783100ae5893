//! Strip configuration, loaded from a TOML file or built in code.
//!
//! Every field has a default, so an empty file (or `StripConfig::default()`)
//! gives the stock strip: today's month, nothing selected, English names,
//! ISO weeks, `"MMMM YYYY"` header, no entrance animation.

use crate::locale::LocaleConfig;
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::Date;

time::serde::format_description!(ymd, Date, "[year]-[month]-[day]");

pub(crate) const DEFAULT_HEADER_FORMAT: &str = "MMMM YYYY";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct StripConfig {
    /// First day of the initial period; today when absent
    #[serde(with = "ymd::option")]
    pub(crate) starting_date: Option<Date>,
    #[serde(with = "ymd::option")]
    pub(crate) selected_date: Option<Date>,
    pub(crate) locale: Option<LocaleConfig>,
    /// Start periods on Monday rather than on the locale's first day of week
    pub(crate) use_iso_weekday: bool,
    pub(crate) calendar_header_format: String,
    /// Scroll the strip a viewport at a time instead of a cell at a time
    pub(crate) paging_enabled: bool,
    pub(crate) shows_horizontal_scroll_indicator: bool,
    pub(crate) calendar_animation: Option<AnimationConfig>,
    pub(crate) style: StyleOverrides,
}

impl Default for StripConfig {
    fn default() -> StripConfig {
        StripConfig {
            starting_date: None,
            selected_date: None,
            locale: None,
            use_iso_weekday: true,
            calendar_header_format: String::from(DEFAULT_HEADER_FORMAT),
            paging_enabled: true,
            shows_horizontal_scroll_indicator: false,
            calendar_animation: None,
            style: StyleOverrides::default(),
        }
    }
}

impl StripConfig {
    pub(crate) fn load_from_path<P: AsRef<Path>>(path: P) -> Result<StripConfig, LoadError> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&src).map_err(|source| LoadError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}

/// Entrance animation settings.  `type` is kept as written and only checked
/// when an animation is actually started.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct AnimationConfig {
    #[serde(rename = "type")]
    pub(crate) kind: String,
    /// Milliseconds per cell
    pub(crate) duration: u64,
}

/// Looks passed through to the day cells
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct StyleOverrides {
    pub(crate) calendar_color: Option<Color>,
    pub(crate) highlight_color: Option<Color>,
    pub(crate) border_highlight_color: Option<Color>,
    pub(crate) calendar_header_style: CellStyle,
    pub(crate) date_name_style: CellStyle,
    pub(crate) date_number_style: CellStyle,
    pub(crate) weekend_date_name_style: CellStyle,
    pub(crate) weekend_date_number_style: CellStyle,
    pub(crate) highlight_date_name_style: CellStyle,
    pub(crate) highlight_date_number_style: CellStyle,
    pub(crate) style_weekend: bool,
    pub(crate) selection: SelectionMode,
}

impl Default for StyleOverrides {
    fn default() -> StyleOverrides {
        StyleOverrides {
            calendar_color: None,
            highlight_color: None,
            border_highlight_color: None,
            calendar_header_style: CellStyle::default(),
            date_name_style: CellStyle::default(),
            date_number_style: CellStyle::default(),
            weekend_date_name_style: CellStyle::default(),
            weekend_date_number_style: CellStyle::default(),
            highlight_date_name_style: CellStyle::default(),
            highlight_date_number_style: CellStyle::default(),
            style_weekend: true,
            selection: SelectionMode::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct CellStyle {
    pub(crate) fg: Option<Color>,
    pub(crate) bg: Option<Color>,
    pub(crate) bold: bool,
    pub(crate) italic: bool,
    pub(crate) underlined: bool,
}

impl CellStyle {
    /// Returns `base` with this override's colors and modifiers layered on top
    pub(crate) fn apply(&self, base: Style) -> Style {
        let mut style = base;
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        for (on, modifier) in [
            (self.bold, Modifier::BOLD),
            (self.italic, Modifier::ITALIC),
            (self.underlined, Modifier::UNDERLINED),
        ] {
            if on {
                style = style.add_modifier(modifier);
            }
        }
        style
    }
}

/// How the selected day cell is highlighted
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SelectionMode {
    #[default]
    Background,
    Border,
}

/// A configuration that cannot be turned into a working strip
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ConfigError {
    #[error("locale must have both a name and a ruleset")]
    IncompleteLocale,
    #[error("invalid first day of week {0}; expected 0 (Sunday) through 6 (Saturday)")]
    InvalidWeekStart(u8),
    #[error("unknown calendar animation type {0:?}; expected \"sequence\" or \"parallel\"")]
    UnknownAnimation(String),
}

#[derive(Debug, Error)]
pub(crate) enum LoadError {
    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
