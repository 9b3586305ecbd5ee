use chrono::Local;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

use super::{App, View};
use crate::report::graph::{self, GraphLayout, Tail};
use crate::report::text::{Segment, Tone};
use crate::util::format_timestamp;

const BASELINE: Color = Color::Rgb(0x4a, 0x90, 0xe2);
const ADDED: Color = Color::Rgb(0xe9, 0x4d, 0x4d);
const REMOVED: Color = Color::Rgb(0x7c, 0xd6, 0x7c);

const STATUS: &str =
    "F1: Snapshots | F2: Graph | Up: newer snapshot | Down: older snapshot (Graph) | q: quit";

// name column never takes more than this many cells
const MAX_NAME_WIDTH: usize = 40;

pub fn draw(frame: &mut Frame, app: &App) {
    let [tabs_area, body, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let selected_tab = match app.view() {
        View::Snapshots => 0,
        View::Graph => 1,
    };
    let tabs = Tabs::new(vec!["Snapshots (F1)", "Graph (F2)"])
        .select(selected_tab)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
    frame.render_widget(tabs, tabs_area);

    match app.view() {
        View::Snapshots => draw_snapshots(frame, app, body),
        View::Graph => draw_graph(frame, app, body),
    }

    frame.render_widget(
        Paragraph::new(STATUS).style(Style::default().fg(Color::DarkGray)),
        status_area,
    );
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Plain => Style::default(),
        Tone::Title => Style::default()
            .fg(Color::Rgb(0xd1, 0x6f, 0xff))
            .add_modifier(Modifier::BOLD),
        Tone::Weekday => Style::default()
            .fg(Color::Rgb(0x4a, 0x8b, 0xff))
            .add_modifier(Modifier::BOLD),
        Tone::Header => Style::default().fg(Color::Rgb(0xd1, 0x6f, 0xff)),
        Tone::Total => Style::default().fg(Color::Rgb(0xe4, 0xe2, 0x61)),
        Tone::NonEmpty => Style::default().fg(Color::Rgb(0x7c, 0xd6, 0x7c)),
    }
}

fn styled_line(segments: &[Segment]) -> Line<'_> {
    Line::from(
        segments
            .iter()
            .map(|s| Span::styled(s.text.as_str(), tone_style(s.tone)))
            .collect::<Vec<_>>(),
    )
}

fn draw_snapshots(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app.text().iter().map(|l| styled_line(l)).collect();
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::TOP))
        .scroll((app.text_scroll(), 0));
    frame.render_widget(paragraph, area);
}

fn message(frame: &mut Frame, area: Rect, text: &str) {
    frame.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::TOP)),
        area,
    );
}

fn legend(color: Color, text: &str) -> Line<'_> {
    Line::from(vec![
        Span::styled("  ", Style::default().bg(color)),
        Span::raw(" "),
        Span::raw(text),
    ])
}

fn draw_graph(frame: &mut Frame, app: &App, area: Rect) {
    let Some(delta) = app.current_delta() else {
        message(frame, area, "No snapshots available.");
        return;
    };
    let history = app.history();
    let snapshot = &history[app.selected()];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = vec![
        Line::from(format!(
            "Showing snapshot {} of {} (timestamp {})",
            app.selected() + 1,
            history.len(),
            format_timestamp(snapshot.timestamp, &Local)
        )),
        Line::styled(
            format!("Total lines (including empty): {}", snapshot.total_lines()),
            bold,
        ),
        Line::styled(
            format!("Total non-empty lines:        {}", snapshot.non_empty_lines()),
            bold,
        ),
        Line::raw(""),
        legend(BASELINE, "Baseline lines (prev snapshot or current for first)"),
        legend(ADDED, "New lines in this snapshot"),
        legend(REMOVED, "Removed lines vs previous"),
        Line::raw(""),
    ];

    let [header_area, bars_area] = Layout::vertical([
        Constraint::Length(header.len() as u16 + 1),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::TOP)),
        header_area,
    );

    let name_width = delta
        .entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_WIDTH);
    let label_width = delta.max_total.to_string().len();
    let bar_width = (bars_area.width as usize).saturating_sub(name_width + label_width + 2);

    let bars = match graph::layout(&delta, u16::try_from(bar_width).unwrap_or(u16::MAX)) {
        GraphLayout::NoFiles => {
            frame.render_widget(Paragraph::new("No file data."), bars_area);
            return;
        }
        GraphLayout::AllZero => {
            frame.render_widget(Paragraph::new("All totals are zero."), bars_area);
            return;
        }
        GraphLayout::Bars(bars) => bars,
    };

    let lines: Vec<Line> = bars
        .into_iter()
        .map(|bar| {
            let tail_color = match bar.tail {
                Tail::Added => ADDED,
                Tail::Removed => REMOVED,
                Tail::None => BASELINE,
            };
            Line::from(vec![
                Span::raw(format!("{:>name_width$} ", truncate(&bar.name, name_width))),
                Span::styled(
                    "█".repeat(bar.base_cols as usize),
                    Style::default().fg(BASELINE),
                ),
                Span::styled(
                    "█".repeat(bar.tail_cols as usize),
                    Style::default().fg(tail_color),
                ),
                Span::raw(format!(" {}", bar.current)),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).scroll((app.graph_scroll(), 0)),
        bars_area,
    );
}

// keeps the tail of long paths, that is where the file name is
fn truncate(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().skip(len - max_len + 3).collect();
        format!("...{kept}")
    }
}
