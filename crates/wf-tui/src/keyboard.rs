/// Keyboard and mouse input handling. Mutations are validated here, where the
/// stores can be read, so the reducers only ever see allowed changes.
use crate::actions::{Action, PanelId};
use crate::stores::ui_store::UIState;
use crate::stores::{AppLogsStore, FleetStore, LogPanelStore, UIStore};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::crossterm;
use ratatui::layout::Position;
use wf_core::Route;

const PAGE_ROWS: isize = 10;
const WHEEL_ROWS: isize = 3;

/// Handle keyboard input and return the appropriate Action
pub fn handle_key_event(
    key_event: KeyEvent,
    ui_store: &UIStore,
    fleet_store: &FleetStore,
    app_logs_store: &AppLogsStore,
) -> Option<Action> {
    let ui_state = ui_store.get_state();

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(Action::Quit);
    }

    // Overlays swallow everything else
    if ui_state.show_diagnostics {
        return handle_diagnostics_keys(key_event, app_logs_store);
    }
    if ui_state.show_help {
        return match key_event.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') | KeyCode::Esc => Some(Action::ToggleHelp),
            _ => None,
        };
    }

    match key_event.code {
        // Global keys
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('?') => return Some(Action::ToggleHelp),
        KeyCode::Char('!') => return Some(Action::ToggleDiagnostics),
        KeyCode::Char('p') => return Some(Action::Navigate(Route::Profile)),
        KeyCode::Char('m') => return Some(Action::ToggleSidebar),
        KeyCode::Esc if ui_state.sidebar_open => return Some(Action::ToggleSidebar),
        KeyCode::Esc if ui_state.route != Route::Dashboard => return Some(Action::NavigateBack),
        _ => {}
    }

    // An open drawer takes list navigation on any page
    if ui_state.sidebar_open {
        return handle_worker_list_keys(key_event, fleet_store);
    }

    match &ui_state.route {
        Route::Dashboard => handle_dashboard_keys(key_event, &ui_state, fleet_store),
        Route::WorkerDetail(id) => handle_worker_detail_keys(key_event, id, fleet_store),
        Route::Profile => match key_event.code {
            KeyCode::Char('S') if !ui_state.signed_out => Some(Action::SignOut),
            _ => handle_page_scroll_keys(key_event),
        },
        Route::TaskHistory(_) | Route::Screenshots(_) => handle_page_scroll_keys(key_event),
    }
}

fn handle_dashboard_keys(
    key_event: KeyEvent,
    ui_state: &UIState,
    fleet_store: &FleetStore,
) -> Option<Action> {
    let focused_panel = ui_state.focused_panel;

    match key_event.code {
        KeyCode::Tab => Some(Action::FocusPanel(focused_panel.next())),
        KeyCode::BackTab => Some(Action::FocusPanel(focused_panel.previous())),
        KeyCode::Char('l') => Some(Action::ToggleLogPanel),
        KeyCode::Char('n') => match fleet_store.check_spawn() {
            Ok(()) => Some(Action::SpawnWorker),
            Err(e) => Some(Action::ShowError(e.to_string())),
        },
        KeyCode::Char('t') => selected_route(fleet_store, Route::TaskHistory),
        KeyCode::Char('s') => selected_route(fleet_store, Route::Screenshots),

        _ => match focused_panel {
            PanelId::Sidebar => handle_worker_list_keys(key_event, fleet_store),
            PanelId::LiveView => match key_event.code {
                KeyCode::Enter => selected_route(fleet_store, Route::WorkerDetail),
                _ => None,
            },
            PanelId::LogPanel => handle_log_panel_keys(key_event),
        },
    }
}

fn handle_worker_list_keys(key_event: KeyEvent, fleet_store: &FleetStore) -> Option<Action> {
    match key_event.code {
        KeyCode::Char('j') | KeyCode::Down => next_worker(fleet_store),
        KeyCode::Char('k') | KeyCode::Up => previous_worker(fleet_store),
        KeyCode::Enter => selected_route(fleet_store, Route::WorkerDetail),
        _ => None,
    }
}

fn handle_log_panel_keys(key_event: KeyEvent) -> Option<Action> {
    match key_event.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollLogs(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollLogs(-1)),
        KeyCode::PageDown => Some(Action::ScrollLogs(PAGE_ROWS)),
        KeyCode::PageUp => Some(Action::ScrollLogs(-PAGE_ROWS)),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::ScrollLogs(isize::MIN)),
        KeyCode::Char('G') | KeyCode::End => Some(Action::JumpToLatest),
        _ => None,
    }
}

fn handle_worker_detail_keys(
    key_event: KeyEvent,
    worker_id: &str,
    fleet_store: &FleetStore,
) -> Option<Action> {
    let exists = fleet_store.worker(worker_id).is_some();

    match key_event.code {
        KeyCode::Char('t') if exists => Some(Action::Navigate(Route::TaskHistory(
            worker_id.to_string(),
        ))),
        KeyCode::Char('s') if exists => Some(Action::Navigate(Route::Screenshots(
            worker_id.to_string(),
        ))),
        KeyCode::Char('x') if exists => match fleet_store.check_toggle(worker_id) {
            Ok(()) => Some(Action::ToggleWorkerStatus(worker_id.to_string())),
            Err(e) => Some(Action::ShowError(e.to_string())),
        },
        KeyCode::Char('D') if exists => Some(Action::DeleteWorker(worker_id.to_string())),
        _ => handle_page_scroll_keys(key_event),
    }
}

fn handle_page_scroll_keys(key_event: KeyEvent) -> Option<Action> {
    match key_event.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollPage(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollPage(-1)),
        KeyCode::PageDown => Some(Action::ScrollPage(PAGE_ROWS)),
        KeyCode::PageUp => Some(Action::ScrollPage(-PAGE_ROWS)),
        _ => None,
    }
}

fn handle_diagnostics_keys(key_event: KeyEvent, app_logs_store: &AppLogsStore) -> Option<Action> {
    match key_event.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('!') | KeyCode::Esc => Some(Action::ToggleDiagnostics),

        // Scroll logs
        KeyCode::Char('j') | KeyCode::Down => {
            app_logs_store.scroll_down(1);
            None // No action needed, store updated directly
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app_logs_store.scroll_up(1);
            None
        }
        KeyCode::PageDown => {
            app_logs_store.scroll_down(10);
            None
        }
        KeyCode::PageUp => {
            app_logs_store.scroll_up(10);
            None
        }
        KeyCode::Char('g') => {
            app_logs_store.scroll_to_bottom();
            None
        }
        _ => None,
    }
}

/// Route for the selected worker, if there is one
fn selected_route(fleet_store: &FleetStore, route: fn(String) -> Route) -> Option<Action> {
    fleet_store
        .selected_worker()
        .map(|w| Action::Navigate(route(w.id)))
}

/// Select the next worker in the list
fn next_worker(fleet_store: &FleetStore) -> Option<Action> {
    let workers = fleet_store.workers();
    if workers.is_empty() {
        return None;
    }

    let current_index = fleet_store.selected_index().unwrap_or(0);
    let next_index = if current_index >= workers.len() - 1 {
        0
    } else {
        current_index + 1
    };
    Some(Action::SelectWorker(workers[next_index].id.clone()))
}

/// Select the previous worker in the list
fn previous_worker(fleet_store: &FleetStore) -> Option<Action> {
    let workers = fleet_store.workers();
    if workers.is_empty() {
        return None;
    }

    let current_index = fleet_store.selected_index().unwrap_or(0);
    let prev_index = if current_index == 0 {
        workers.len() - 1
    } else {
        current_index - 1
    };
    Some(Action::SelectWorker(workers[prev_index].id.clone()))
}

/// Wheel scrolls whatever is under the pointer; a click on the marker jumps
/// the log panel to the newest line
pub fn handle_mouse_event(
    mouse_event: MouseEvent,
    ui_store: &UIStore,
    log_panel_store: &LogPanelStore,
) -> Option<Action> {
    let ui_state = ui_store.get_state();
    if ui_state.show_diagnostics || ui_state.show_help {
        return None;
    }

    let position = Position::new(mouse_event.column, mouse_event.row);
    let panel = log_panel_store.get_state();
    let over_logs = panel.panel_area.is_some_and(|a| a.contains(position));

    let delta = match mouse_event.kind {
        MouseEventKind::ScrollUp => -WHEEL_ROWS,
        MouseEventKind::ScrollDown => WHEEL_ROWS,
        MouseEventKind::Down(MouseButton::Left) => {
            return panel
                .jump_area
                .is_some_and(|a| a.contains(position))
                .then_some(Action::JumpToLatest);
        }
        _ => return None,
    };

    if over_logs {
        Some(Action::ScrollLogs(delta))
    } else if ui_state.route != Route::Dashboard {
        Some(Action::ScrollPage(delta))
    } else {
        None
    }
}
