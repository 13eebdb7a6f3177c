/// Screenshot gallery for one worker. Captures are listed as cards with the
/// task they were taken during, when known.
use crate::stores::fleet_store::FleetState;
use crate::ui::{breadcrumb, render_page, render_placeholder};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};
use wf_core::format::{format_capture_time, pluralize};
use wf_core::models::Worker;
use wf_core::views::{linked_task, screenshots_for_worker};

struct Capture {
    id: String,
    index: u32,
    captured_at: String,
    task: Option<String>,
}

pub struct ScreenshotGallery {
    worker_id: String,
    worker: Option<Worker>,
    captures: Vec<Capture>,
    scroll: usize,
}

impl ScreenshotGallery {
    pub fn from_state(worker_id: &str, fleet_state: &FleetState, scroll: usize) -> Self {
        let captures = screenshots_for_worker(&fleet_state.screenshots, worker_id)
            .into_iter()
            .map(|s| Capture {
                id: s.id.clone(),
                index: s.index,
                captured_at: format_capture_time(&s.captured_at),
                task: linked_task(&fleet_state.tasks, s).map(|t| t.description.clone()),
            })
            .collect();
        Self {
            worker_id: worker_id.to_string(),
            worker: fleet_state.fleet.get(worker_id),
            captures,
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
            .title(breadcrumb(&[name, "Screenshots"]));

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
                pluralize(self.captures.len(), "capture"),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
        ];
        if self.captures.is_empty() {
            lines.push(Line::from(Span::styled(
                "no screenshots captured",
                Style::default().fg(Color::DarkGray),
            )));
        }

        for capture in &self.captures {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("#{:03}", capture.index),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", capture.captured_at),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("  {}", capture.id),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            if let Some(task) = &capture.task {
                lines.push(Line::from(Span::styled(
                    format!("  ▸ {task}"),
                    Style::default().fg(Color::Gray),
                )));
            }
            lines.push(Line::from(""));
        }
        render_page(lines, self.scroll, block, area, buf);
    }
}
