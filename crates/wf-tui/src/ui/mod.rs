/// UI module: layout, panels and pages. Widgets are built from store snapshots
/// and draw straight into the frame buffer.
pub mod diagnostics;
pub mod layout;
pub mod live_view;
pub mod log_panel;
pub mod profile;
pub mod screenshot_gallery;
pub mod sidebar;
pub mod task_history;
pub mod top_bar;
pub mod worker_detail;

pub use diagnostics::DiagnosticsOverlay;
pub use layout::{Breakpoints, render_layout};
pub use live_view::LiveView;
pub use log_panel::LogPanel;
pub use profile::ProfilePage;
pub use screenshot_gallery::ScreenshotGallery;
pub use sidebar::Sidebar;
pub use task_history::TaskHistoryPage;
pub use top_bar::TopBar;
pub use worker_detail::WorkerDetailPage;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use wf_core::models::{LogKind, TaskStatus, WorkerStatus};

pub fn worker_status_color(status: WorkerStatus) -> Color {
    match status {
        WorkerStatus::Busy => Color::LightBlue,
        WorkerStatus::Idle => Color::Green,
        WorkerStatus::Starting => Color::Yellow,
        WorkerStatus::Offline => Color::DarkGray,
    }
}

pub fn task_status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Queued => Color::Gray,
        TaskStatus::Processing => Color::LightBlue,
        TaskStatus::Completed => Color::Green,
        TaskStatus::Failed => Color::Red,
    }
}

pub fn log_kind_color(kind: LogKind) -> Color {
    match kind {
        LogKind::Info => Color::Gray,
        LogKind::Success => Color::Green,
        LogKind::Error => Color::Red,
        LogKind::Warn => Color::Yellow,
        LogKind::System => Color::LightBlue,
    }
}

/// `[BUSY]` style badge
pub fn badge(label: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!("[{label}]"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Upper-case heading that opens a page section
pub fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("── {} ", title.to_uppercase()),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Label/value row inside a section
pub fn row(label: &str, value: impl Into<String>) -> Line<'static> {
    row_styled(label, value, Style::default().fg(Color::White))
}

pub fn row_styled(label: &str, value: impl Into<String>, value_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<18}", label.to_uppercase()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(value.into(), value_style),
    ])
}

/// `← Dashboard / Section / name` breadcrumb shown above every page
pub fn breadcrumb(parts: &[&str]) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "← DASHBOARD",
        Style::default().fg(Color::DarkGray),
    )];
    for (i, part) in parts.iter().enumerate() {
        spans.push(Span::styled(" / ", Style::default().fg(Color::DarkGray)));
        let style = if i + 1 == parts.len() {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(part.to_string(), style));
    }
    Line::from(spans)
}

/// Centered, dimmed message filling `area`
pub fn render_placeholder(text: &str, style: Style, block: Block, area: Rect, buf: &mut Buffer) {
    let inner = block.inner(area);
    block.render(area, buf);
    let middle = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(inner)[1];
    Paragraph::new(text.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .render(middle, buf);
}

/// Scrolled page content. The offset is clamped so the last line stays reachable.
pub fn render_page(lines: Vec<Line<'static>>, scroll: usize, block: Block, area: Rect, buf: &mut Buffer) {
    let inner_height = block.inner(area).height as usize;
    let max_scroll = lines.len().saturating_sub(inner_height);
    let offset = scroll.min(max_scroll) as u16;
    Paragraph::new(lines)
        .block(block)
        .scroll((offset, 0))
        .render(area, buf);
}

/// Centered rectangle taking the given share of `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
pub(crate) mod test_utils {
    use ratatui::buffer::Buffer;

    /// Whole buffer as newline separated rows
    pub fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }
}
