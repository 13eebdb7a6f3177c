/// Full screen overlay with the console's own log records, newest at the bottom
use crate::stores::app_logs_store::AppLogsState;
use log::Level;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

pub struct DiagnosticsOverlay {
    state: AppLogsState,
}

impl DiagnosticsOverlay {
    pub fn new(state: AppLogsState) -> Self {
        Self { state }
    }

    fn level_color(level: Level) -> Color {
        match level {
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Info => Color::Green,
            Level::Debug => Color::Cyan,
            Level::Trace => Color::DarkGray,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" Diagnostics ({} entries) ", self.state.entries.len()))
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let height = chunks[0].height as usize;
        let total = self.state.entries.len();
        // the oldest page stays full once scrolled past it
        let end = total
            .saturating_sub(self.state.scroll_offset)
            .max(height.min(total));
        let start = end.saturating_sub(height);

        let lines: Vec<Line> = self.state.entries[start..end]
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", entry.timestamp),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("{:<5} ", entry.level),
                        Style::default().fg(Self::level_color(entry.level)),
                    ),
                    Span::styled(
                        format!("{}: ", entry.target),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(entry.message.clone()),
                ])
            })
            .collect();
        Paragraph::new(lines).render(chunks[0], buf);

        let position = if self.state.scroll_offset == 0 {
            "latest".to_string()
        } else {
            format!("{} above latest", self.state.scroll_offset)
        };
        Paragraph::new(Line::from(vec![
            Span::styled(
                "j/k: scroll · g: latest · !/esc: close",
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(format!("  [{position}]"), Style::default().fg(Color::Gray)),
        ]))
        .render(chunks[1], buf);
    }
}
