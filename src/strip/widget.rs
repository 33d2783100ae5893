use super::day::{DayCell, DAY_HEIGHT, DAY_WIDTH};
use super::{StripController, StripListener};
use crate::theme::HEADER_STYLE;
use ratatui::{prelude::*, widgets::*};
use std::marker::PhantomData;

/// Number of lines taken up by the header label and the gap below it
const HEADER_LINES: u16 = 2;

/// Total height of the strip including the scrollbar line
pub(crate) const STRIP_HEIGHT: u16 = HEADER_LINES + DAY_HEIGHT + 1;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Strip<L> {
    _data: PhantomData<L>,
}

impl<L> Strip<L> {
    pub(crate) fn new() -> Strip<L> {
        Strip { _data: PhantomData }
    }
}

impl<L: StripListener> StatefulWidget for Strip<L> {
    type State = StripController<L>;

    /*
     * .............March 2024.............
     * ....................................
     * .FRI...SAT...SUN...MON...TUE...WED..
     * ..1.....2.....3.....4.....5.....6...
     * ............................────....   <- border selection only
     * ◄═══════════════─────────────────►   <- scrollbar, when enabled
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let base = state.base_style();
        buf.set_style(area, base);
        let [header_area, cells_area, bar_area] = Layout::vertical([
            Constraint::Length(HEADER_LINES),
            Constraint::Length(DAY_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(area);
        Line::styled(
            state.header_label(),
            state.looks.calendar_header_style.apply(HEADER_STYLE),
        )
        .centered()
        .render(header_area, buf);

        let dates = state.visible_dates();
        let content = u16::try_from(dates.len())
            .unwrap_or(u16::MAX)
            .saturating_mul(DAY_WIDTH);
        state.view.set_extent(cells_area.width, content);
        state.view.clear_cells();
        let offset = state.view.offset();
        let right = offset.saturating_add(cells_area.width);
        let mut active = None;
        for (i, date) in std::iter::zip(0u16.., dates) {
            let x = i.saturating_mul(DAY_WIDTH);
            let cell = DayCell::new(date, base, &state.looks, &state.locale)
                .selected(state.is_selected(date))
                .opacity(state.animation.opacity(usize::from(i)));
            if let Some(ax) = cell.active_coord(x) {
                active = Some(ax);
            }
            // Cells that would be cut off by either edge are left out
            if x < offset || x.saturating_add(DAY_WIDTH) > right {
                continue;
            }
            let cell_area = Rect {
                x: cells_area.x + (x - offset),
                y: cells_area.y,
                width: DAY_WIDTH,
                height: cells_area.height,
            };
            state.view.push_cell(cell_area, date);
            cell.render(cell_area, buf);
        }
        state.view.note_active(active);

        if state.shows_scroll_indicator && content > cells_area.width {
            let mut bar_state = ScrollbarState::new(usize::from(state.view.max_offset()))
                .position(usize::from(offset))
                .viewport_content_length(usize::from(cells_area.width));
            Scrollbar::new(ScrollbarOrientation::HorizontalBottom)
                .style(base)
                .render(bar_area, buf, &mut bar_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SelectionMode, StripConfig, StyleOverrides};
    use std::time::Instant;
    use time::macros::date;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    fn render(strip: &mut StripController<()>, width: u16) -> Buffer {
        let area = Rect::new(0, 0, width, STRIP_HEIGHT);
        let mut buf = Buffer::empty(area);
        strip.prepare_render(Instant::now()).unwrap();
        Strip::new().render(area, &mut buf, strip);
        buf
    }

    fn strip(config: StripConfig) -> StripController<()> {
        StripController::new(config, date!(2024 - 03 - 05), ()).unwrap()
    }

    #[test]
    fn test_first_cells() {
        let mut s = strip(StripConfig::default());
        let buf = render(&mut s, 40);
        assert_eq!(row(&buf, 0), "               March 2024               ");
        assert_eq!(row(&buf, 1), " ".repeat(40));
        // Six whole cells fit in 40 columns
        assert_eq!(row(&buf, 2), " FRI   SAT   SUN   MON   TUE   WED      ");
        assert_eq!(row(&buf, 3), "  1     2     3     4     5     6       ");
        assert_eq!(row(&buf, 4), " ".repeat(40));
        assert_eq!(row(&buf, 5), " ".repeat(40));
    }

    #[test]
    fn test_hit_testing() {
        let mut s = strip(StripConfig::default());
        render(&mut s, 40);
        assert_eq!(s.date_at(0, 2), Some(date!(2024 - 03 - 01)));
        assert_eq!(s.date_at(13, 3), Some(date!(2024 - 03 - 03)));
        assert_eq!(s.date_at(38, 3), None);
        assert_eq!(s.date_at(13, 0), None);
    }

    #[test]
    fn test_border_selection_marker() {
        let config = StripConfig {
            selected_date: Some(date!(2024 - 03 - 02)),
            style: StyleOverrides {
                selection: SelectionMode::Border,
                ..StyleOverrides::default()
            },
            ..StripConfig::default()
        };
        let mut s = strip(config);
        let buf = render(&mut s, 40);
        assert_eq!(row(&buf, 4), "       ────                             ");
    }

    #[test]
    fn test_paged_scrolling() {
        let mut s = strip(StripConfig::default());
        render(&mut s, 36);
        assert!(s.scroll(true), "should scroll forwards a page");
        // Let the scroll settle
        for _ in 0..36 {
            render(&mut s, 36);
        }
        let buf = render(&mut s, 36);
        assert_eq!(row(&buf, 3), "  7     8     9     10    11    12  ");
        assert_eq!(s.date_at(0, 3), Some(date!(2024 - 03 - 07)));
    }

    #[test]
    fn test_cell_scrolling() {
        let config = StripConfig {
            paging_enabled: false,
            ..StripConfig::default()
        };
        let mut s = strip(config);
        render(&mut s, 36);
        assert!(s.scroll(true), "should scroll forwards a day");
        for _ in 0..6 {
            render(&mut s, 36);
        }
        let buf = render(&mut s, 36);
        assert_eq!(row(&buf, 3), "  2     3     4     5     6     7   ");
        assert!(s.scroll(false), "should scroll back a day");
    }

    #[test]
    fn test_scrollbar() {
        let config = StripConfig {
            shows_horizontal_scroll_indicator: true,
            ..StripConfig::default()
        };
        let mut s = strip(config);
        let buf = render(&mut s, 40);
        assert_ne!(row(&buf, 5), " ".repeat(40));
    }

    #[test]
    fn test_active_day_schedules_scroll() {
        let config = StripConfig {
            selected_date: Some(date!(2024 - 03 - 20)),
            ..StripConfig::default()
        };
        let mut s = strip(config);
        let t0 = Instant::now();
        render(&mut s, 40);
        s.after_render(t0);
        assert_eq!(s.next_wakeup(t0), Some(std::time::Duration::from_secs(1)));
        // Rendering again without the selection moving does not reschedule
        render(&mut s, 40);
        s.after_render(t0 + std::time::Duration::from_millis(500));
        assert_eq!(
            s.next_wakeup(t0 + std::time::Duration::from_millis(500)),
            Some(std::time::Duration::from_millis(500))
        );
    }

    #[test]
    fn test_deferred_scroll_shows_whole_cells() {
        let config = StripConfig {
            selected_date: Some(date!(2024 - 03 - 20)),
            ..StripConfig::default()
        };
        let mut s = strip(config);
        let t0 = Instant::now();
        render(&mut s, 40);
        s.after_render(t0);
        s.prepare_render(t0 + std::time::Duration::from_secs(1))
            .unwrap();
        for _ in 0..40 {
            render(&mut s, 40);
        }
        let buf = render(&mut s, 40);
        // The 20th starts at column 114; the scroll stops on the 18th's edge
        assert_eq!(row(&buf, 3), "  18    19    20    21    22    23      ");
        assert_eq!(s.date_at(0, 3), Some(date!(2024 - 03 - 18)));
    }

    #[test]
    fn test_pages_by_whole_cells() {
        let mut s = strip(StripConfig::default());
        render(&mut s, 40);
        assert!(s.scroll(true), "should scroll forwards a page");
        for _ in 0..40 {
            render(&mut s, 40);
        }
        // Six whole cells fit in 40 columns, so a page is six days
        assert_eq!(s.date_at(0, 3), Some(date!(2024 - 03 - 07)));
    }
}
