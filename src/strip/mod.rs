mod animation;
mod day;
mod header;
mod scroll;
mod widget;
pub(crate) use self::widget::{Strip, STRIP_HEIGHT};
use self::animation::EntranceAnimation;
use self::day::DAY_WIDTH;
use self::header::HeaderFormat;
use self::scroll::StripView;
use crate::config::{ConfigError, StripConfig, StyleOverrides};
use crate::locale::Locale;
use crate::theme::BASE_STYLE;
use ratatui::style::Style;
use std::time::Instant;
use thiserror::Error;
use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Weekday};

/// How often to redraw while something on the strip is moving
pub(crate) const FRAME_INTERVAL: std::time::Duration = std::time::Duration::from_millis(33);

/// Receives the strip's outbound events.  Both methods default to doing
/// nothing, so a host only implements the ones it cares about.
pub(crate) trait StripListener {
    /// Called whenever the user selects a day
    fn date_selected(&mut self, _date: Date) {}

    /// Called after every move to the previous or next period with the first
    /// day of the new pivot date's week
    fn week_changed(&mut self, _period_start: Date) {}
}

impl StripListener for () {}

/// Anything with a calendar day.  Comparisons made through this trait ignore
/// the time of day.
pub(crate) trait CalendarDay {
    fn calendar_date(&self) -> Date;
}

impl CalendarDay for Date {
    fn calendar_date(&self) -> Date {
        *self
    }
}

impl CalendarDay for PrimitiveDateTime {
    fn calendar_date(&self) -> Date {
        self.date()
    }
}

impl CalendarDay for OffsetDateTime {
    fn calendar_date(&self) -> Date {
        self.date()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct StripController<L> {
    locale: Locale,
    header: HeaderFormat,
    use_iso_weekday: bool,
    paging_enabled: bool,
    shows_scroll_indicator: bool,
    looks: StyleOverrides,
    pivot: Date,
    selected: Option<Date>,
    // The selected date most recently supplied by the host, compared against
    // on the next `receive_selected_date()`
    host_selected: Option<Date>,
    // Bumped on every change of selection, whether by the host or by a tap;
    // the animation guard compares revisions rather than dates so that
    // re-selecting the same day still counts as a change
    selection_rev: u64,
    rendered_rev: Option<u64>,
    changed: bool,
    animation: EntranceAnimation,
    view: StripView,
    listener: L,
}

impl<L: StripListener> StripController<L> {
    pub(crate) fn new(
        config: StripConfig,
        today: Date,
        listener: L,
    ) -> Result<StripController<L>, ConfigError> {
        // The locale is validated before any date is looked at
        let locale = Locale::from_config(config.locale.as_ref())?;
        let pivot = config.starting_date.unwrap_or(today);
        let positions = usize::from(days_in_month(pivot.year(), pivot.month()));
        tracing::debug!(
            %pivot,
            selected = ?config.selected_date,
            locale = locale.name(),
            "initializing calendar strip"
        );
        Ok(StripController {
            header: HeaderFormat::new(&config.calendar_header_format),
            use_iso_weekday: config.use_iso_weekday,
            paging_enabled: config.paging_enabled,
            shows_scroll_indicator: config.shows_horizontal_scroll_indicator,
            looks: config.style,
            pivot,
            selected: config.selected_date,
            host_selected: config.selected_date,
            selection_rev: 0,
            rendered_rev: None,
            changed: false,
            animation: EntranceAnimation::new(config.calendar_animation, positions),
            view: StripView::default(),
            locale,
            listener,
        })
    }

    pub(crate) fn listener(&self) -> &L {
        &self.listener
    }

    pub(crate) fn selected(&self) -> Option<Date> {
        self.selected
    }

    /// Takes a selected date supplied by the host.  Nothing happens unless the
    /// value differs from what the host supplied last time.
    pub(crate) fn receive_selected_date(&mut self, date: Option<Date>) {
        if date == self.host_selected {
            return;
        }
        tracing::debug!(?date, "host supplied a new selected date");
        self.host_selected = date;
        self.selected = date;
        self.selection_changed();
    }

    pub(crate) fn go_to_previous_period(&mut self) -> Result<(), OutOfTimeError> {
        let pivot = self.pivot.checked_sub(Duration::WEEK).ok_or(OutOfTimeError)?;
        self.shift_pivot(pivot);
        Ok(())
    }

    pub(crate) fn go_to_next_period(&mut self) -> Result<(), OutOfTimeError> {
        let pivot = self.pivot.checked_add(Duration::WEEK).ok_or(OutOfTimeError)?;
        self.shift_pivot(pivot);
        Ok(())
    }

    fn shift_pivot(&mut self, pivot: Date) {
        self.pivot = pivot;
        self.changed = true;
        self.view.cancel_scroll();
        let start = self.period_start(pivot);
        tracing::debug!(%pivot, period_start = %start, "moved to another period");
        self.listener.week_changed(start);
    }

    /// Returns the first day of the period containing `date`
    pub(crate) fn period_start(&self, date: Date) -> Date {
        let first = if self.use_iso_weekday {
            Weekday::Monday
        } else {
            self.locale.week_start()
        };
        let back = (7 + date.weekday().number_days_from_sunday()
            - first.number_days_from_sunday())
            % 7;
        date.checked_sub(Duration::days(back.into())).unwrap_or(date)
    }

    /// Returns every day of the pivot date's month in order
    pub(crate) fn visible_dates(&self) -> Vec<Date> {
        let year = self.pivot.year();
        let month = self.pivot.month();
        (1..=days_in_month(year, month))
            .filter_map(|day| Date::from_calendar_date(year, month, day).ok())
            .collect()
    }

    pub(crate) fn select_date<D: CalendarDay>(&mut self, date: D) {
        let date = date.calendar_date();
        tracing::debug!(%date, "date selected");
        self.selected = Some(date);
        self.selection_changed();
        self.listener.date_selected(date);
    }

    pub(crate) fn is_selected<D: CalendarDay>(&self, date: D) -> bool {
        self.selected == Some(date.calendar_date())
    }

    fn selection_changed(&mut self) {
        self.selection_rev = self.selection_rev.wrapping_add(1);
        self.changed = true;
    }

    pub(crate) fn header_label(&self) -> String {
        let dates = self.visible_dates();
        match (dates.first(), dates.last()) {
            (Some(&first), Some(&last)) => self.header.label(first, last, &self.locale),
            _ => String::new(),
        }
    }

    pub(crate) fn reset_animation(&mut self) {
        let positions = usize::from(days_in_month(self.pivot.year(), self.pivot.month()));
        self.animation.reset(positions);
    }

    pub(crate) fn run_entrance_animation(&mut self, now: Instant) -> Result<(), ConfigError> {
        self.animation.start(now)
    }

    /// Asks for the strip to scroll so that content column `x` is near its
    /// left edge, one `SCROLL_DELAY` from `now`
    pub(crate) fn scroll_to_selected_position(&mut self, x: u16, now: Instant) {
        self.view.schedule_scroll(x, now);
    }

    /// Brings the strip up to date before drawing it.
    ///
    /// The entrance animation replays on the first render, and on any later
    /// render following a change that left the selection alone (moving to
    /// another period, say).  Selecting a day never replays it.
    pub(crate) fn prepare_render(&mut self, now: Instant) -> Result<(), ConfigError> {
        let replay = match self.rendered_rev {
            None => true,
            Some(rev) => self.changed && rev == self.selection_rev,
        };
        if replay {
            // Reject a bad animation type before the progress values are
            // touched
            self.animation.kind()?;
            self.reset_animation();
            self.run_entrance_animation(now)?;
        }
        self.rendered_rev = Some(self.selection_rev);
        self.changed = false;
        self.animation.advance(now);
        self.view.advance(now);
        Ok(())
    }

    /// Schedules a scroll to the selected cell if the last render moved it
    pub(crate) fn after_render(&mut self, now: Instant) {
        if let Some(x) = self.view.take_active_change() {
            self.scroll_to_selected_position(x, now);
        }
    }

    /// Returns how long the host may wait for input before the strip needs
    /// redrawing, or `None` if it can wait indefinitely
    pub(crate) fn next_wakeup(&self, now: Instant) -> Option<std::time::Duration> {
        if self.animation.is_animating() || self.view.is_moving() {
            Some(FRAME_INTERVAL)
        } else {
            self.view
                .deadline()
                .map(|due| due.saturating_duration_since(now))
        }
    }

    /// Scrolls the strip by a page if paging is enabled, else by one day.
    /// Returns `false` if already at that end.
    pub(crate) fn scroll(&mut self, forwards: bool) -> bool {
        let columns = if self.paging_enabled {
            (self.view.viewport() / DAY_WIDTH).max(1) * DAY_WIDTH
        } else {
            DAY_WIDTH
        };
        self.view.scroll_by(columns, forwards)
    }

    /// Returns the date of the cell drawn at the given screen position, if
    /// any
    pub(crate) fn date_at(&self, column: u16, row: u16) -> Option<Date> {
        self.view.date_at(column, row)
    }

    /// Drops any scroll still waiting to happen
    pub(crate) fn teardown(&mut self) {
        self.view.cancel_scroll();
    }

    fn base_style(&self) -> Style {
        match self.looks.calendar_color {
            Some(color) => BASE_STYLE.bg(color),
            None => BASE_STYLE,
        }
    }
}

pub(crate) fn days_in_month(year: i32, month: Month) -> u8 {
    month.length(year)
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;
