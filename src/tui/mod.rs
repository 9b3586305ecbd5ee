//! Interactive history browser.
//!
//! Two views:
//! - Snapshots (F1): the text report, scrollable
//! - Graph (F2): per-file delta bars for one snapshot, Up = newer, Down = older
//!
//! Everything runs on the calling thread. The terminal is restored on every
//! exit path, including draw errors.

mod view;

use std::io;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tracing::debug;

use crate::report::text::{self, TextLine};
use crate::snapshot::Snapshot;
use crate::store::diff::{delta_for, SnapshotDelta};

const PAGE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Snapshots,
    Graph,
}

pub struct App {
    history: Vec<Snapshot>,
    text: Vec<TextLine>,
    view: View,
    /// Index into `history` shown by the graph, newest = len - 1
    selected: usize,
    text_scroll: u16,
    graph_scroll: u16,
    quit: bool,
}

impl App {
    /// `history` is oldest first. The graph starts on the newest snapshot.
    pub fn new(history: Vec<Snapshot>) -> Self {
        let text = text::render(&history, &Local);
        App {
            selected: history.len().saturating_sub(1),
            history,
            text,
            view: View::Snapshots,
            text_scroll: 0,
            graph_scroll: 0,
            quit: false,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    pub fn text(&self) -> &[TextLine] {
        &self.text
    }

    pub fn text_scroll(&self) -> u16 {
        self.text_scroll
    }

    pub fn graph_scroll(&self) -> u16 {
        self.graph_scroll
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn current_delta(&self) -> Option<SnapshotDelta> {
        delta_for(&self.history, self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit = true,
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::F(1) | KeyCode::Char('1') => self.view = View::Snapshots,
            KeyCode::F(2) | KeyCode::Char('2') => self.view = View::Graph,
            KeyCode::Tab => {
                self.view = match self.view {
                    View::Snapshots => View::Graph,
                    View::Graph => View::Snapshots,
                }
            }
            KeyCode::Up => match self.view {
                View::Graph => self.newer(),
                View::Snapshots => self.scroll_up(1),
            },
            KeyCode::Down => match self.view {
                View::Graph => self.older(),
                View::Snapshots => self.scroll_down(1),
            },
            KeyCode::PageUp => self.scroll_up(PAGE),
            KeyCode::PageDown => self.scroll_down(PAGE),
            KeyCode::Home => *self.scroll_mut() = 0,
            _ => {}
        }
    }

    /// Step toward the newest snapshot, stops at the end
    pub fn newer(&mut self) {
        if self.selected + 1 < self.history.len() {
            self.selected += 1;
            self.graph_scroll = 0;
            debug!(selected = self.selected, "graph moved to newer snapshot");
        }
    }

    /// Step toward the oldest snapshot, stops at the first
    pub fn older(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.graph_scroll = 0;
            debug!(selected = self.selected, "graph moved to older snapshot");
        }
    }

    fn scroll_limit(&self) -> u16 {
        let lines = match self.view {
            View::Snapshots => self.text.len(),
            View::Graph => self.current_delta().map_or(0, |d| d.entries.len()),
        };
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn scroll_mut(&mut self) -> &mut u16 {
        match self.view {
            View::Snapshots => &mut self.text_scroll,
            View::Graph => &mut self.graph_scroll,
        }
    }

    fn scroll_up(&mut self, by: u16) {
        let scroll = self.scroll_mut();
        *scroll = scroll.saturating_sub(by);
    }

    fn scroll_down(&mut self, by: u16) {
        let limit = self.scroll_limit();
        let scroll = self.scroll_mut();
        *scroll = scroll.saturating_add(by).min(limit);
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        while !self.quit {
            terminal.draw(|frame| view::draw(frame, self))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }
}

/// Take over the terminal until the user quits
pub fn run(history: Vec<Snapshot>) -> io::Result<()> {
    let mut app = App::new(history);
    let mut terminal = ratatui::init();
    let result = app.run_loop(&mut terminal);
    ratatui::restore();
    result
}

pub use view::draw;
