use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const HEADER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

/// Text color of Saturdays and Sundays when weekend styling is on
pub(crate) const WEEKEND_COLOR: Color = Color::LightRed;

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

/// Background of the selected day when no `highlight_color` is configured
pub(crate) const HIGHLIGHT_COLOR: Color = Color::Yellow;

/// Text color on top of `HIGHLIGHT_COLOR`
pub(crate) const HIGHLIGHT_TEXT_COLOR: Color = Color::Black;

/// Marker color under the selected day when no `border_highlight_color` is
/// configured
pub(crate) const BORDER_HIGHLIGHT_COLOR: Color = Color::LightYellow;
