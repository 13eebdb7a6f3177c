/// Header bar: brand, fleet summary chips and the logs toggle
use crate::stores::ui_store::UIState;
use crate::ui::Breakpoints;
use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use wf_core::models::Worker;
use wf_core::views::{FleetSummary, fleet_summary};

pub struct TopBar {
    summary: FleetSummary,
    max_workers: usize,
    sidebar_open: bool,
    log_panel_open: bool,
    show_menu: bool,
    show_logs_toggle: bool,
    username: String,
}

impl TopBar {
    pub fn new(
        workers: &[Worker],
        max_workers: usize,
        ui_state: &UIState,
        breakpoints: &Breakpoints,
        width: u16,
        username: &str,
    ) -> Self {
        Self {
            summary: fleet_summary(workers),
            max_workers,
            sidebar_open: ui_state.sidebar_open,
            log_panel_open: ui_state.log_panel_open,
            show_menu: !breakpoints.sidebar_docked(width),
            show_logs_toggle: !breakpoints.log_panel_pinned(width),
            username: username.to_string(),
        }
    }

    /// `2 online · 1 processing · 3/3 workers`
    pub fn summary_text(&self) -> String {
        let mut chips = vec![format!("{} online", self.summary.online)];
        if self.summary.busy > 0 {
            chips.push(format!("{} processing", self.summary.busy));
        }
        if self.summary.starting > 0 {
            chips.push(format!("{} starting", self.summary.starting));
        }
        chips.push(format!("{}/{} workers", self.summary.total, self.max_workers));
        chips.iter().join(" · ")
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut left = Vec::new();
        if self.show_menu {
            let glyph = if self.sidebar_open { "✕ " } else { "≡ " };
            left.push(Span::styled(glyph, Style::default().fg(Color::Gray)));
        }
        left.push(Span::styled("● ", Style::default().fg(Color::Green)));
        left.push(Span::styled(
            "WORKER FACTORY",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
        left.push(Span::styled(" / ops", Style::default().fg(Color::DarkGray)));
        left.push(Span::raw("   "));
        left.push(Span::styled(
            self.summary_text(),
            Style::default().fg(Color::Gray),
        ));
        Paragraph::new(Line::from(left)).render(inner, buf);

        let mut right = Vec::new();
        if self.show_logs_toggle {
            let style = if self.log_panel_open {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            right.push(Span::styled("[LOGS]", style));
            right.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        right.push(Span::styled(
            format!("{} ", self.username),
            Style::default().fg(Color::Gray),
        ));
        Paragraph::new(Line::from(right))
            .alignment(Alignment::Right)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_utils::buffer_text;
    use wf_core::MockData;
    use wf_core::models::WorkerStatus;

    fn breakpoints() -> Breakpoints {
        Breakpoints {
            sm: 60,
            lg: 100,
            xl: 140,
        }
    }

    #[test]
    fn test_summary_hides_zero_chips() {
        let mut workers = MockData::load().unwrap().workers;
        let bar = TopBar::new(&workers, 3, &UIState::default(), &breakpoints(), 120, "operator");
        assert_eq!(bar.summary_text(), "2 online · 1 processing · 3/3 workers");

        workers[2].status = WorkerStatus::Starting;
        workers[0].status = WorkerStatus::Idle;
        let bar = TopBar::new(&workers, 3, &UIState::default(), &breakpoints(), 120, "operator");
        assert_eq!(bar.summary_text(), "3 online · 1 starting · 3/3 workers");
    }

    #[test]
    fn test_logs_toggle_hidden_when_pinned() {
        let workers = MockData::load().unwrap().workers;
        let area = Rect::new(0, 0, 150, 3);

        let mut buf = Buffer::empty(area);
        TopBar::new(&workers, 3, &UIState::default(), &breakpoints(), 150, "operator")
            .render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("WORKER FACTORY"));
        assert!(!text.contains("[LOGS]"));

        let mut buf = Buffer::empty(area);
        TopBar::new(&workers, 3, &UIState::default(), &breakpoints(), 110, "operator")
            .render(area, &mut buf);
        assert!(buffer_text(&buf).contains("[LOGS]"));
    }
}
