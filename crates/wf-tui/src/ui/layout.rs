/// Layout manager for the console. The body depends on the route and on how
/// wide the terminal is.
use crate::stores::{AppLogsStore, FleetStore, LogPanelStore, UIStore};
use crate::stores::ui_store::UIState;
use crate::ui::{
    DiagnosticsOverlay, LiveView, LogPanel, ProfilePage, ScreenshotGallery, Sidebar,
    TaskHistoryPage, TopBar, WorkerDetailPage, centered_rect,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use wf_core::Route;
use wf_core::get_wf_setting;

const SIDEBAR_WIDTH: u16 = 34;

/// Terminal widths (columns) at which the layout changes shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    pub sm: u16,
    pub lg: u16,
    pub xl: u16,
}

impl Breakpoints {
    pub fn from_settings() -> Self {
        let to_u16 = |v: usize| v.min(u16::MAX as usize) as u16;
        Self {
            sm: to_u16(get_wf_setting!(WF_TUI_SM_WIDTH, usize)),
            lg: to_u16(get_wf_setting!(WF_TUI_LG_WIDTH, usize)),
            xl: to_u16(get_wf_setting!(WF_TUI_XL_WIDTH, usize)),
        }
    }

    /// Sidebar is part of the layout rather than a drawer
    pub fn sidebar_docked(&self, width: u16) -> bool {
        width >= self.lg
    }

    /// Log panel is always shown and cannot be toggled
    pub fn log_panel_pinned(&self, width: u16) -> bool {
        width >= self.xl
    }

    pub fn log_panel_visible(&self, width: u16, open: bool) -> bool {
        self.log_panel_pinned(width) || (open && width >= self.sm)
    }
}

/// Render the complete console
pub fn render_layout(
    frame: &mut Frame,
    breakpoints: &Breakpoints,
    ui_store: &UIStore,
    fleet_store: &FleetStore,
    log_panel_store: &LogPanelStore,
    app_logs_store: &AppLogsStore,
) {
    let area = frame.area();
    let ui_state = ui_store.get_state();
    let fleet_state = fleet_store.get_state();
    let workers = fleet_state.fleet.workers();

    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Body
            Constraint::Length(3), // Footer
        ])
        .split(area);

    TopBar::new(
        &workers,
        fleet_state.fleet.max_workers(),
        &ui_state,
        breakpoints,
        area.width,
        &fleet_state.profile.username,
    )
    .render(vertical_chunks[0], frame.buffer_mut());

    let body = vertical_chunks[1];
    let docked = breakpoints.sidebar_docked(area.width);
    let content = if docked {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
            .split(body);
        render_sidebar(frame, chunks[0], &ui_state, fleet_store);
        chunks[1]
    } else {
        body
    };

    match &ui_state.route {
        Route::Dashboard => {
            render_dashboard(frame, content, breakpoints, &ui_state, fleet_store, log_panel_store)
        }
        Route::WorkerDetail(id) => {
            log_panel_store.set_hit_areas(None, None);
            WorkerDetailPage::from_state(id, &fleet_state, ui_state.page_scroll)
                .render(content, frame.buffer_mut());
        }
        Route::TaskHistory(id) => {
            log_panel_store.set_hit_areas(None, None);
            TaskHistoryPage::from_state(id, &fleet_state, ui_state.page_scroll)
                .render(content, frame.buffer_mut());
        }
        Route::Screenshots(id) => {
            log_panel_store.set_hit_areas(None, None);
            ScreenshotGallery::from_state(id, &fleet_state, ui_state.page_scroll)
                .render(content, frame.buffer_mut());
        }
        Route::Profile => {
            log_panel_store.set_hit_areas(None, None);
            ProfilePage::from_state(&fleet_state, ui_state.signed_out, ui_state.page_scroll)
                .render(content, frame.buffer_mut());
        }
    }

    // Drawer over the body on narrow terminals
    if !docked && ui_state.sidebar_open {
        let drawer = Rect {
            width: SIDEBAR_WIDTH.min(body.width),
            ..body
        };
        Clear.render(drawer, frame.buffer_mut());
        render_sidebar(frame, drawer, &ui_state, fleet_store);
    }

    render_footer(frame, vertical_chunks[2], &ui_state);

    if ui_state.show_help {
        render_help(frame, area);
    }

    if ui_state.show_diagnostics {
        DiagnosticsOverlay::new(app_logs_store.get_state()).render(area, frame.buffer_mut());
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, ui_state: &UIState, fleet_store: &FleetStore) {
    let sidebar = Sidebar::from_state(
        fleet_store.workers(),
        fleet_store.selected_index(),
        fleet_store.get_state().fleet.max_workers(),
        ui_state,
    );
    sidebar.render(area, frame.buffer_mut());
}

fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    breakpoints: &Breakpoints,
    ui_state: &UIState,
    fleet_store: &FleetStore,
    log_panel_store: &LogPanelStore,
) {
    let width = frame.area().width;
    if !breakpoints.log_panel_visible(width, ui_state.log_panel_open) {
        log_panel_store.set_hit_areas(None, None);
        LiveView::new(fleet_store.selected_worker(), ui_state).render(area, frame.buffer_mut());
        return;
    }

    // Pinned panel gets its own column, a toggled one slides up from the bottom
    let chunks = if breakpoints.log_panel_pinned(width) {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area)
    };

    LiveView::new(fleet_store.selected_worker(), ui_state).render(chunks[0], frame.buffer_mut());
    render_log_panel(frame, chunks[1], ui_state, log_panel_store);
}

fn render_log_panel(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UIState,
    log_panel_store: &LogPanelStore,
) {
    // viewport first so the follow offset is computed for this frame's size
    log_panel_store.set_viewport(LogPanel::viewport(area).height as usize);
    let (worker, lines) = log_panel_store.visible();
    let panel = LogPanel::from_state(
        lines,
        worker.map(|w| w.name),
        log_panel_store.follow(),
        ui_state,
    );
    let areas = panel.render(area, frame.buffer_mut());
    log_panel_store.set_hit_areas(Some(area), areas.jump);
}

fn render_footer(frame: &mut Frame, area: Rect, ui_state: &UIState) {
    let block = Block::default().borders(Borders::ALL);

    if let Some(err) = &ui_state.error_message {
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(
                err.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(block)
        .render(area, frame.buffer_mut());
        return;
    }

    let help_text = if ui_state.show_help {
        "Press ? to hide help"
    } else {
        match ui_state.route {
            Route::Dashboard => {
                "q:Quit | tab:Focus | j/k:Move | enter:Open | n:Spawn | m:Menu | l:Logs | p:Profile | ?:Help"
            }
            Route::WorkerDetail(_) => {
                "esc:Back | t:Tasks | s:Screenshots | x:Start/Stop | D:Delete | j/k:Scroll | ?:Help"
            }
            Route::Profile => "esc:Back | S:Sign out | j/k:Scroll | ?:Help",
            Route::TaskHistory(_) | Route::Screenshots(_) => "esc:Back | j/k:Scroll | ?:Help",
        }
    };

    Paragraph::new(Line::from(vec![Span::raw(" "), Span::raw(help_text)]))
        .style(Style::default().fg(Color::DarkGray))
        .block(block)
        .render(area, frame.buffer_mut());
}

fn render_help(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    Clear.render(popup, frame.buffer_mut());

    let key = |k: &str, what: &str| {
        Line::from(vec![
            Span::styled(format!("  {k:<14}"), Style::default().fg(Color::Cyan)),
            Span::raw(what.to_string()),
        ])
    };
    let lines = vec![
        Line::from(Span::styled(
            "Global",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        key("q / ctrl-c", "quit"),
        key("?", "toggle this help"),
        key("!", "diagnostics"),
        key("p", "profile"),
        key("esc", "back / close"),
        Line::from(""),
        Line::from(Span::styled(
            "Dashboard",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        key("tab / shift-tab", "cycle panels"),
        key("j / k", "select worker or scroll logs"),
        key("G / end", "jump to latest log line"),
        key("enter", "open worker"),
        key("t / s", "tasks / screenshots"),
        key("n", "spawn worker"),
        key("m", "toggle sidebar"),
        key("l", "toggle log panel"),
        Line::from(""),
        Line::from(Span::styled(
            "Worker",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        key("x", "start / stop"),
        key("D", "delete"),
    ];

    Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .render(popup, frame.buffer_mut());
}
