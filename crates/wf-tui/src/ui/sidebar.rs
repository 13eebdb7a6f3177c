/// Sidebar listing the fleet. Docked on wide terminals, a drawer otherwise.
use crate::actions::PanelId;
use crate::stores::ui_store::UIState;
use crate::ui::{render_placeholder, worker_status_color};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};
use wf_core::models::Worker;

pub struct Sidebar {
    pub workers: Vec<Worker>,
    pub selected_index: Option<usize>,
    pub max_workers: usize,
    pub is_focused: bool,
}

impl Sidebar {
    pub fn from_state(
        workers: Vec<Worker>,
        selected_index: Option<usize>,
        max_workers: usize,
        ui_state: &UIState,
    ) -> Self {
        Self {
            workers,
            selected_index,
            max_workers,
            is_focused: ui_state.focused_panel == PanelId::Sidebar,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let active = self.workers.iter().filter(|w| w.status.is_online()).count();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Workers ")
            .title(
                Line::from(format!(
                    " {} active · {}/{} ",
                    active,
                    self.workers.len(),
                    self.max_workers
                ))
                .right_aligned(),
            )
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(2)])
            .split(inner);

        self.render_list(chunks[0], buf);
        self.render_spawn_hint(chunks[1], buf);
    }

    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        if self.workers.is_empty() {
            render_placeholder(
                "NO WORKERS",
                Style::default().fg(Color::DarkGray),
                Block::default(),
                area,
                buf,
            );
            return;
        }

        let items: Vec<ListItem> = self
            .workers
            .iter()
            .map(|worker| {
                let color = worker_status_color(worker.status);
                let detail = worker
                    .current_task
                    .clone()
                    .unwrap_or_else(|| format!("{} tasks done", worker.completed_tasks));
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled("● ", Style::default().fg(color)),
                        Span::styled(
                            worker.name.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(" "),
                        Span::styled(worker.status.as_str(), Style::default().fg(color)),
                    ]),
                    Line::from(Span::styled(
                        format!("  :{} · {}", worker.port, detail),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▌");

        let mut list_state = ListState::default();
        list_state.select(self.selected_index);
        StatefulWidget::render(list, area, buf, &mut list_state);
    }

    fn render_spawn_hint(&self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::from(Span::styled(
            "+ SPAWN WORKER (n)",
            Style::default().fg(Color::Green),
        ))
        .centered()];
        if self.workers.len() >= self.max_workers {
            lines.push(
                Line::from(Span::styled(
                    "MAX WORKERS REACHED",
                    Style::default().fg(Color::DarkGray),
                ))
                .centered(),
            );
        }
        Paragraph::new(lines).render(area, buf);
    }
}
