/// Live view canvas for the selected worker: a stand-in for the VNC feed plus
/// the skill catalog a task can be routed to.
use crate::actions::PanelId;
use crate::stores::ui_store::UIState;
use crate::ui::{badge, render_placeholder, section, worker_status_color};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use wf_core::models::{Worker, WorkerStatus};
use wf_core::skills::SKILLS;

pub struct LiveView {
    worker: Option<Worker>,
    is_focused: bool,
}

impl LiveView {
    pub fn new(worker: Option<Worker>, ui_state: &UIState) -> Self {
        Self {
            worker,
            is_focused: ui_state.focused_panel == PanelId::LiveView,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let Some(worker) = &self.worker else {
            block = block.title(" LIVE VIEW ");
            render_placeholder(
                "NO WORKER SELECTED",
                Style::default().fg(Color::DarkGray),
                block,
                area,
                buf,
            );
            return;
        };

        block = block
            .title(Line::from(vec![
                Span::styled(" LIVE VIEW", Style::default().fg(Color::Gray)),
                Span::styled(" / ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{} ", worker.name),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]))
            .title(
                Line::from(Span::styled(
                    format!(" vnc :{} ", worker.port),
                    Style::default().fg(Color::DarkGray),
                ))
                .right_aligned(),
            );
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(SKILLS.len() as u16 + 2)])
            .split(inner);

        Self::render_bezel(worker, chunks[0], buf);
        Self::render_skills(chunks[1], buf);
    }

    fn render_bezel(worker: &Worker, area: Rect, buf: &mut Buffer) {
        let color = worker_status_color(worker.status);
        let bezel = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Line::from(vec![Span::raw(" "), badge(worker.status.as_str(), color), Span::raw(" ")]));
        let inner = bezel.inner(area);
        bezel.render(area, buf);

        let headline = match worker.status {
            WorkerStatus::Busy => worker
                .current_task
                .clone()
                .unwrap_or_else(|| "working…".to_string()),
            WorkerStatus::Idle => "idle · awaiting task".to_string(),
            WorkerStatus::Starting => "booting container…".to_string(),
            WorkerStatus::Offline => "offline · no signal".to_string(),
        };

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("▸ {headline}"),
                Style::default().fg(Color::White),
            ))
            .centered(),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} · {} tasks completed", worker.id, worker.completed_tasks),
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
            Line::from(Span::styled(
                "enter: details · t: tasks · s: screenshots",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    fn render_skills(area: Rect, buf: &mut Buffer) {
        let mut lines = vec![section("Skills")];
        lines.extend(SKILLS.iter().map(|(_, info)| {
            Line::from(vec![
                Span::styled(format!("  {} ", info.icon), Style::default().fg(Color::Green)),
                Span::styled(
                    format!("{:<16}", info.label),
                    Style::default().fg(Color::White),
                ),
                Span::styled(info.hint, Style::default().fg(Color::DarkGray)),
            ])
        }));
        Paragraph::new(lines).render(area, buf);
    }
}
