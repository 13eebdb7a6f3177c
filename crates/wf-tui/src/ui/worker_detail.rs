/// Worker detail page: identity, activity counters and the start/stop and
/// delete controls.
use crate::stores::fleet_store::FleetState;
use crate::ui::{
    badge, breadcrumb, render_page, render_placeholder, row, row_styled, section,
    worker_status_color,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};
use wf_core::format::format_date;
use wf_core::models::{Worker, WorkerStatus};
use wf_core::views::{WorkerActivity, worker_activity};

enum PageState {
    Found(Worker, WorkerActivity),
    Removed,
    NotFound,
}

pub struct WorkerDetailPage {
    worker_id: String,
    state: PageState,
    scroll: usize,
}

impl WorkerDetailPage {
    pub fn from_state(worker_id: &str, fleet_state: &FleetState, scroll: usize) -> Self {
        let state = if fleet_state.removed_worker_id.as_deref() == Some(worker_id) {
            PageState::Removed
        } else {
            match fleet_state.fleet.get(worker_id) {
                Some(worker) => {
                    let activity =
                        worker_activity(&worker, &fleet_state.tasks, &fleet_state.screenshots);
                    PageState::Found(worker, activity)
                }
                None => PageState::NotFound,
            }
        };
        Self {
            worker_id: worker_id.to_string(),
            state,
            scroll,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let label = match &self.state {
            PageState::Found(worker, _) => worker.name.as_str(),
            _ => self.worker_id.as_str(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(breadcrumb(&["Worker", label]));

        match &self.state {
            PageState::Removed => render_placeholder(
                "worker removed",
                Style::default().fg(Color::DarkGray),
                block,
                area,
                buf,
            ),
            PageState::NotFound => render_placeholder(
                "worker not found",
                Style::default().fg(Color::Red),
                block,
                area,
                buf,
            ),
            PageState::Found(worker, activity) => {
                render_page(Self::lines(worker, activity), self.scroll, block, area, buf)
            }
        }
    }

    fn lines(worker: &Worker, activity: &WorkerActivity) -> Vec<Line<'static>> {
        let color = worker_status_color(worker.status);
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} ", worker.name.to_uppercase()),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                badge(worker.status.as_str(), color),
            ]),
            Line::from(Span::styled(
                worker.id.clone(),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        if let Some(task) = &worker.current_task {
            lines.push(Line::from(Span::styled(
                format!("▸ {task}"),
                Style::default().fg(Color::LightBlue),
            )));
        }
        lines.push(Line::from(""));

        lines.push(section("Details"));
        lines.push(row("VNC port", format!(":{}", worker.port)));
        lines.push(row("Created", format_date(&worker.created_at)));
        lines.push(row_styled(
            "Status",
            worker.status.as_str(),
            Style::default().fg(color),
        ));
        lines.push(Line::from(""));

        lines.push(section("Activity"));
        lines.push(row("Tasks completed", activity.completed_tasks.to_string()));
        lines.push(row("Tasks total", activity.total_tasks.to_string()));
        let failed_style = if activity.failed_tasks > 0 {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(row_styled(
            "Failed tasks",
            activity.failed_tasks.to_string(),
            failed_style,
        ));
        lines.push(row("Screenshots", activity.screenshots.to_string()));
        lines.push(Line::from(""));

        lines.push(section("Data"));
        lines.push(Self::control("t", "≡ Task History", Color::Gray));
        lines.push(Self::control("s", "⊙ Screenshots", Color::Gray));
        lines.push(Line::from(""));

        lines.push(section("Controls"));
        let toggle = if worker.status.is_online() {
            "⏹ Stop Worker"
        } else {
            "▷ Start Worker"
        };
        if worker.status.can_toggle() {
            lines.push(Self::control("x", toggle, Color::Yellow));
        } else {
            let reason = if worker.status == WorkerStatus::Busy {
                "busy — cannot stop"
            } else {
                "starting — please wait"
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  [x] {toggle}  "), Style::default().fg(Color::DarkGray)),
                Span::styled(reason, Style::default().fg(Color::DarkGray)),
            ]));
        }
        lines.push(Line::from(""));

        lines.push(section("Danger Zone"));
        lines.push(Line::from(Span::styled(
            "  Permanently remove this worker and its container",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Self::control("D", "Delete", Color::Red));
        lines
    }

    fn control(key: &str, label: &str, color: Color) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("  [{key}] "), Style::default().fg(Color::DarkGray)),
            Span::styled(label.to_string(), Style::default().fg(color)),
        ])
    }
}
