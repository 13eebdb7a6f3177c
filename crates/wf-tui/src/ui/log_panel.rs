/// "Task Output" panel: the selected worker's log stream with follow behavior
use crate::actions::PanelId;
use crate::stores::ui_store::UIState;
use crate::ui::{log_kind_color, render_placeholder};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;
use wf_core::LogFollow;
use wf_core::models::LogLine;
use wf_core::views::{LogCounts, log_counts};

const JUMP_LABEL: &str = " ↓ LATEST ";
const CURSOR: &str = "█";
/// `HH:MM:SS` plus a gap
const TIMESTAMP_COLUMNS: usize = 9;

pub struct LogPanel {
    lines: Vec<LogLine>,
    counts: LogCounts,
    worker_name: Option<String>,
    follow: LogFollow,
    is_focused: bool,
}

/// Where the panel ended up on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPanelAreas {
    /// Rows available to log lines
    pub viewport: Rect,
    /// The jump-to-latest marker, when shown
    pub jump: Option<Rect>,
}

impl LogPanel {
    pub fn from_state(
        lines: Vec<LogLine>,
        worker_name: Option<String>,
        follow: LogFollow,
        ui_state: &UIState,
    ) -> Self {
        let counts = log_counts(&lines);
        Self {
            lines,
            counts,
            worker_name,
            follow,
            is_focused: ui_state.focused_panel == PanelId::LogPanel,
        }
    }

    /// Inner area the lines are drawn into, before anything is rendered
    pub fn viewport(area: Rect) -> Rect {
        Self::block(Color::DarkGray).inner(area)
    }

    fn block(border_color: Color) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
    }

    fn header(&self) -> (Line<'static>, Line<'static>) {
        let mut left = vec![Span::styled(
            " TASK OUTPUT ",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )];
        if self.counts.lines > 0 {
            left.push(Span::styled(
                format!("{} ", self.counts.lines),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let mut right = Vec::new();
        if self.counts.errors > 0 {
            right.push(Span::styled(
                format!(" {} err", self.counts.errors),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        if self.counts.warnings > 0 {
            right.push(Span::styled(
                format!(" {} warn", self.counts.warnings),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        if let Some(name) = &self.worker_name {
            right.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            right.push(Span::styled(
                name.clone(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        right.push(Span::raw(" "));
        (Line::from(left), Line::from(right).right_aligned())
    }

    fn footer(&self) -> Line<'static> {
        let text = if self.counts.lines > 0 {
            format!(" {} lines ", self.counts.lines)
        } else {
            " no output ".to_string()
        };
        Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
    }

    fn render_line(line: &LogLine) -> Line<'static> {
        let color = log_kind_color(line.kind);
        Line::from(vec![
            Span::styled(
                format!(
                    "{:<width$}",
                    line.timestamp.format("%H:%M:%S").to_string(),
                    width = TIMESTAMP_COLUMNS
                ),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(format!("{} ", line.kind.glyph()), Style::default().fg(color)),
            Span::styled(line.message.clone(), Style::default().fg(Color::Gray)),
        ])
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) -> LogPanelAreas {
        let border_color = if self.is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let (title_left, title_right) = self.header();
        let block = Self::block(border_color)
            .title(title_left)
            .title(title_right)
            .title_bottom(self.footer());
        let viewport = block.inner(area);

        if self.lines.is_empty() {
            render_placeholder(
                "AWAITING TASK…",
                Style::default().fg(Color::DarkGray),
                block,
                area,
                buf,
            );
            return LogPanelAreas {
                viewport,
                jump: None,
            };
        }

        let mut rendered: Vec<Line> = self.lines.iter().map(Self::render_line).collect();
        // liveness cursor, not part of any count
        rendered.push(Line::from(vec![
            Span::raw(" ".repeat(TIMESTAMP_COLUMNS)),
            Span::styled(CURSOR, Style::default().fg(Color::Green)),
        ]));

        let scroll_top = self.follow.scroll_top().min(u16::MAX as usize) as u16;
        Paragraph::new(rendered)
            .block(block)
            .scroll((scroll_top, 0))
            .render(area, buf);

        let jump = if self.follow.show_jump_button() {
            Some(self.render_jump_marker(viewport, buf))
        } else {
            None
        };
        LogPanelAreas { viewport, jump }
    }

    fn render_jump_marker(&self, viewport: Rect, buf: &mut Buffer) -> Rect {
        let width = (JUMP_LABEL.width() as u16).min(viewport.width);
        let marker = Rect {
            x: viewport.right().saturating_sub(width + 1).max(viewport.x),
            y: viewport.bottom().saturating_sub(1),
            width,
            height: 1.min(viewport.height),
        };
        Clear.render(marker, buf);
        Paragraph::new(JUMP_LABEL)
            .style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .render(marker, buf);
        marker
    }
}
