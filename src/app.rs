use crate::help::Help;
use crate::strip::{Strip, StripController, StripListener, STRIP_HEIGHT};
use crate::theme::{BASE_STYLE, STATUS_STYLE};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{StatefulWidget, Widget},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use time::Date;

/// Remembers the most recent event reported by the strip so that it can be
/// shown at the bottom of the screen
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct StatusLine(Option<String>);

impl StatusLine {
    fn message(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl StripListener for StatusLine {
    fn date_selected(&mut self, date: Date) {
        tracing::info!(%date, "date_selected");
        self.0 = Some(format!("Selected {date}"));
    }

    fn week_changed(&mut self, period_start: Date) {
        tracing::info!(%period_start, "week_changed");
        self.0 = Some(format!("Week of {period_start}"));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct App {
    strip: StripController<StatusLine>,
    today: Date,
    state: AppState,
}

impl App {
    pub(crate) fn new(strip: StripController<StatusLine>, today: Date) -> App {
        App {
            strip,
            today,
            state: AppState::Strip,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> anyhow::Result<()> {
        let r = self.event_loop(&mut terminal);
        self.strip.teardown();
        r
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        while !self.quitting() {
            self.strip.prepare_render(Instant::now())?;
            self.draw(terminal)?;
            self.strip.after_render(Instant::now());
            let timeout = self.strip.next_wakeup(Instant::now());
            self.handle_input(timeout)?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    // With a timeout, returns once it passes even if nothing happened so that
    // the strip can advance its animation or scroll
    fn handle_input(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        if let Some(timeout) = timeout {
            if !event::poll(timeout)? {
                return Ok(());
            }
        }
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.state = AppState::Quitting;
                } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                    self.beep()?;
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                self.handle_click(column, row);
            }
            // Redraw on resize and anything else
            _ => (),
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Strip => match key {
                KeyCode::Char('h') | KeyCode::Left => self.tap_neighbor(false),
                KeyCode::Char('l') | KeyCode::Right => self.tap_neighbor(true),
                KeyCode::Char('[') | KeyCode::PageUp => self.strip.go_to_previous_period().is_ok(),
                KeyCode::Char(']') | KeyCode::PageDown => self.strip.go_to_next_period().is_ok(),
                KeyCode::Char('<') => self.strip.scroll(false),
                KeyCode::Char('>') => self.strip.scroll(true),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.strip.receive_selected_date(Some(self.today));
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Strip;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        match self.state {
            AppState::Strip => {
                if let Some(date) = self.strip.date_at(column, row) {
                    self.tap(date);
                }
            }
            AppState::Helping => self.state = AppState::Strip,
            AppState::Quitting => (),
        }
    }

    fn tap(&mut self, date: Date) {
        self.strip.select_date(date);
        // Hand the selection back as our own value, as any host keeping the
        // selected date in its state would
        self.strip.receive_selected_date(Some(date));
    }

    // Taps the visible day after (or before) the selected one.  With nothing
    // selected, the first (or last) visible day is tapped instead.
    fn tap_neighbor(&mut self, forwards: bool) -> bool {
        let dates = self.strip.visible_dates();
        let index = self
            .strip
            .selected()
            .and_then(|sel| dates.iter().position(|&d| d == sel));
        let target = match index {
            Some(i) if forwards => dates.get(i + 1),
            Some(i) => i.checked_sub(1).and_then(|j| dates.get(j)),
            None if forwards => dates.first(),
            None => dates.last(),
        };
        match target.copied() {
            Some(date) => {
                self.tap(date);
                true
            }
            None => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")?;
        io::stdout().flush()
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [strip_area, _, status_area] = Layout::vertical([
            Constraint::Length(STRIP_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);
        Strip::new().render(strip_area, buf, &mut self.strip);
        let status = self
            .strip
            .listener()
            .message()
            .unwrap_or("Press ? for help");
        Line::styled(status, STATUS_STYLE).render(status_area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Strip,
    Helping,
    Quitting,
}
