use crate::config::{SelectionMode, StyleOverrides};
use crate::locale::Locale;
use crate::theme::{BORDER_HIGHLIGHT_COLOR, HIGHLIGHT_COLOR, HIGHLIGHT_TEXT_COLOR, WEEKEND_COLOR};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Widget,
};
use time::{Date, Weekday};

/// Number of columns per day cell
pub(super) const DAY_WIDTH: u16 = 6;

/// Number of lines per day cell: weekday name, day number, selection marker
pub(super) const DAY_HEIGHT: u16 = 3;

const MARKER: &str = "────";

// Cells fading in are not drawn at all below the first threshold and are
// drawn dimmed below the second
const HIDDEN_BELOW: f32 = 1.0 / 3.0;
const DIM_BELOW: f32 = 2.0 / 3.0;

/// A single day of the strip.
///
/// The cell is told whether it is selected and how far it has faded in; it
/// reports its own column back through [`DayCell::active_coord`] when it is
/// the selected one.
#[derive(Clone, Copy, Debug)]
pub(super) struct DayCell<'a> {
    date: Date,
    selected: bool,
    opacity: f32,
    base: Style,
    looks: &'a StyleOverrides,
    locale: &'a Locale,
}

impl<'a> DayCell<'a> {
    pub(super) fn new(
        date: Date,
        base: Style,
        looks: &'a StyleOverrides,
        locale: &'a Locale,
    ) -> DayCell<'a> {
        DayCell {
            date,
            selected: false,
            opacity: 1.0,
            base,
            looks,
            locale,
        }
    }

    pub(super) fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub(super) fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Given the cell's column within the whole strip, returns it if this is
    /// the active cell
    pub(super) fn active_coord(&self, x: u16) -> Option<u16> {
        self.selected.then_some(x)
    }

    fn is_weekend(&self) -> bool {
        matches!(self.date.weekday(), Weekday::Saturday | Weekday::Sunday)
    }

    fn highlight(&self) -> Option<Style> {
        (self.selected && self.looks.selection == SelectionMode::Background).then(|| {
            Style::new()
                .fg(HIGHLIGHT_TEXT_COLOR)
                .bg(self.looks.highlight_color.unwrap_or(HIGHLIGHT_COLOR))
        })
    }

    /// Returns the styles for the weekday name and the day number
    fn styles(&self) -> (Style, Style) {
        let looks = self.looks;
        let (mut name, mut number) = if looks.style_weekend && self.is_weekend() {
            let base = self.base.fg(WEEKEND_COLOR);
            (
                looks
                    .weekend_date_name_style
                    .apply(looks.date_name_style.apply(base)),
                looks
                    .weekend_date_number_style
                    .apply(looks.date_number_style.apply(base)),
            )
        } else {
            (
                looks.date_name_style.apply(self.base),
                looks.date_number_style.apply(self.base),
            )
        };
        if self.selected {
            if let Some(hl) = self.highlight() {
                name = name.patch(hl);
                number = number.patch(hl);
            }
            name = looks.highlight_date_name_style.apply(name);
            number = looks.highlight_date_number_style.apply(number);
        }
        if self.opacity < DIM_BELOW {
            name = name.add_modifier(Modifier::DIM);
            number = number.add_modifier(Modifier::DIM);
        }
        (name, number)
    }
}

impl Widget for DayCell<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.opacity < HIDDEN_BELOW {
            return;
        }
        let (name_style, number_style) = self.styles();
        let name = self
            .locale
            .weekday_short(self.date.weekday())
            .to_uppercase();
        let mut lines = vec![
            Line::styled(name, name_style),
            Line::styled(self.date.day().to_string(), number_style),
        ];
        if self.selected && self.looks.selection == SelectionMode::Border {
            let color = self
                .looks
                .border_highlight_color
                .unwrap_or(BORDER_HIGHLIGHT_COLOR);
            lines.push(Line::styled(MARKER, self.base.fg(color)));
        }
        for (line, row) in std::iter::zip(lines, area.rows()) {
            line.centered().render(row, buf);
        }
    }
}
