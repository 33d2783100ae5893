use super::day::DAY_WIDTH;
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};
use time::Date;

/// How long after a day cell becomes active the strip scrolls to it
pub(super) const SCROLL_DELAY: Duration = Duration::from_secs(1);

/// Scrolling to a cell stops at least this many columns short of its left
/// edge, rounded back to the start of a cell, so that the cells before it stay
/// in view
const SCROLL_LEAD: u16 = 10;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PendingScroll {
    due: Instant,
    target: u16,
}

/// A scroll request waiting out `SCROLL_DELAY`.  At most one is pending at a
/// time; a new request replaces the old one.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct DeferredScroll(Option<PendingScroll>);

impl DeferredScroll {
    pub(super) fn schedule(&mut self, x: u16, now: Instant) {
        let due = now.checked_add(SCROLL_DELAY).unwrap_or(now);
        let target = x.saturating_sub(SCROLL_LEAD) / DAY_WIDTH * DAY_WIDTH;
        tracing::trace!(x, target, "scheduling scroll to active day");
        self.0 = Some(PendingScroll { due, target });
    }

    pub(super) fn cancel(&mut self) {
        if self.0.take().is_some() {
            tracing::trace!("cancelled pending scroll");
        }
    }

    pub(super) fn deadline(&self) -> Option<Instant> {
        self.0.map(|p| p.due)
    }

    /// Returns the scroll target once it is due, consuming the request
    pub(super) fn poll(&mut self, now: Instant) -> Option<u16> {
        match self.0 {
            Some(p) if p.due <= now => {
                self.0 = None;
                Some(p.target)
            }
            _ => None,
        }
    }
}

/// Horizontal scroll position, eased toward its target a few columns per
/// frame
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct ScrollOffset {
    current: u16,
    target: u16,
}

impl ScrollOffset {
    pub(super) fn current(&self) -> u16 {
        self.current
    }

    pub(super) fn target(&self) -> u16 {
        self.target
    }

    pub(super) fn scroll_to(&mut self, x: u16) {
        self.target = x;
    }

    pub(super) fn is_settled(&self) -> bool {
        self.current == self.target
    }

    pub(super) fn clamp(&mut self, max: u16) {
        self.current = self.current.min(max);
        self.target = self.target.min(max);
    }

    pub(super) fn step(&mut self) {
        let distance = self.current.abs_diff(self.target);
        let stride = (distance / 3).max(1).min(distance);
        if self.current < self.target {
            self.current += stride;
        } else {
            self.current -= stride;
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct CellHit {
    area: Rect,
    date: Date,
}

/// Everything the strip remembers about its scrolled row between frames
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct StripView {
    offset: ScrollOffset,
    viewport: u16,
    content: u16,
    // Content column of the active (selected) cell as of the last render, and
    // the value that a scroll was last scheduled for
    active_x: Option<u16>,
    reported_x: Option<u16>,
    deferred: DeferredScroll,
    cells: Vec<CellHit>,
}

impl StripView {
    pub(super) fn offset(&self) -> u16 {
        self.offset.current()
    }

    pub(super) fn viewport(&self) -> u16 {
        self.viewport
    }

    pub(super) fn max_offset(&self) -> u16 {
        self.content.saturating_sub(self.viewport)
    }

    pub(super) fn set_extent(&mut self, viewport: u16, content: u16) {
        self.viewport = viewport;
        self.content = content;
        self.offset.clamp(self.max_offset());
    }

    pub(super) fn clear_cells(&mut self) {
        self.cells.clear();
    }

    pub(super) fn push_cell(&mut self, area: Rect, date: Date) {
        self.cells.push(CellHit { area, date });
    }

    pub(super) fn date_at(&self, column: u16, row: u16) -> Option<Date> {
        let pos = Position::new(column, row);
        self.cells
            .iter()
            .find(|hit| hit.area.contains(pos))
            .map(|hit| hit.date)
    }

    pub(super) fn note_active(&mut self, x: Option<u16>) {
        self.active_x = x;
    }

    /// Returns the active cell's column if it has moved since the last call.
    /// A pending scroll is dropped when no cell is active any more.
    pub(super) fn take_active_change(&mut self) -> Option<u16> {
        if self.active_x == self.reported_x {
            return None;
        }
        self.reported_x = self.active_x;
        if self.active_x.is_none() {
            self.deferred.cancel();
        }
        self.active_x
    }

    pub(super) fn schedule_scroll(&mut self, x: u16, now: Instant) {
        self.deferred.schedule(x, now);
    }

    pub(super) fn cancel_scroll(&mut self) {
        self.deferred.cancel();
        // Let the next render reschedule for wherever the active cell ends up
        self.reported_x = None;
    }

    pub(super) fn scroll_by(&mut self, columns: u16, forwards: bool) -> bool {
        let from = self.offset.target();
        let to = if forwards {
            from.saturating_add(columns).min(self.max_offset())
        } else {
            from.saturating_sub(columns)
        };
        self.offset.scroll_to(to);
        to != from
    }

    pub(super) fn advance(&mut self, now: Instant) {
        if let Some(target) = self.deferred.poll(now) {
            self.offset.scroll_to(target.min(self.max_offset()));
        }
        if !self.offset.is_settled() {
            self.offset.step();
        }
    }

    pub(super) fn is_moving(&self) -> bool {
        !self.offset.is_settled()
    }

    pub(super) fn deadline(&self) -> Option<Instant> {
        self.deferred.deadline()
    }
}
