use crate::stores::fleet_store::FleetState;
use crate::ui::{badge, breadcrumb, render_page, render_placeholder, task_status_color};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};
use wf_core::format::{format_duration, format_short_date, pluralize};
use wf_core::models::{Task, Worker};
use wf_core::views::tasks_for_worker;

pub struct TaskHistoryPage {
    worker_id: String,
    worker: Option<Worker>,
    tasks: Vec<Task>,
    scroll: usize,
}

impl TaskHistoryPage {
    pub fn from_state(worker_id: &str, fleet_state: &FleetState, scroll: usize) -> Self {
        Self {
            worker_id: worker_id.to_string(),
            worker: fleet_state.fleet.get(worker_id),
            tasks: tasks_for_worker(&fleet_state.tasks, worker_id)
                .into_iter()
                .cloned()
                .collect(),
            scroll,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let name = self
            .worker
            .as_ref()
            .map_or(self.worker_id.as_str(), |w| w.name.as_str());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(breadcrumb(&[name, "Task History"]));

        if self.worker.is_none() {
            render_placeholder(
                "Worker not found",
                Style::default().fg(Color::Red),
                block,
                area,
                buf,
            );
            return;
        }

        let mut lines = vec![
            Line::from(Span::styled(
                pluralize(self.tasks.len(), "task") + " total",
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
        ];
        if self.tasks.is_empty() {
            lines.push(Line::from(Span::styled(
                "no tasks recorded",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for task in &self.tasks {
            lines.extend(Self::task_lines(task));
        }
        render_page(lines, self.scroll, block, area, buf);
    }

    fn task_lines(task: &Task) -> [Line<'static>; 3] {
        let info = task.skill.info();
        let duration = task.duration_sec.map(format_duration).unwrap_or_default();
        [
            Line::from(vec![
                badge(task.status.as_str(), task_status_color(task.status)),
                Span::styled(format!(" {} ", info.icon), Style::default().fg(Color::Green)),
                Span::styled(
                    task.description.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!(
                    "  {} · {} · {}  {}",
                    task.id,
                    info.label,
                    format_short_date(&task.created_at),
                    duration
                ),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ]
    }
}
