/// UIStore manages shell state: current page, focus, drawers and overlays
use crate::actions::{Action, PanelId};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use wf_core::Route;

#[derive(Debug, Clone, PartialEq)]
pub struct UIState {
    /// Page being shown
    pub route: Route,

    /// Focused dashboard panel
    pub focused_panel: PanelId,

    /// Sidebar drawer, only meaningful below the lg breakpoint
    pub sidebar_open: bool,

    /// Log panel toggle, only meaningful between sm and xl
    pub log_panel_open: bool,

    pub show_help: bool,

    /// Application log overlay
    pub show_diagnostics: bool,

    /// Vertical scroll of detail pages, clamped when rendered
    pub page_scroll: usize,

    pub error_message: Option<String>,

    /// Token pair was cleared from the profile page
    pub signed_out: bool,

    pub should_exit: bool,
}

impl UIState {
    fn new(route: Route) -> Self {
        Self {
            route,
            focused_panel: PanelId::Sidebar,
            sidebar_open: false,
            log_panel_open: false,
            show_help: false,
            show_diagnostics: false,
            page_scroll: 0,
            error_message: None,
            signed_out: false,
            should_exit: false,
        }
    }
}

impl Default for UIState {
    fn default() -> Self {
        Self::new(Route::Dashboard)
    }
}

#[derive(Clone)]
pub struct UIStore {
    state: Arc<RwLock<UIState>>,
}

impl UIStore {
    pub fn new(route: Route) -> Self {
        Self {
            state: Arc::new(RwLock::new(UIState::new(route))),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, UIState> {
        self.state.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, UIState> {
        self.state.write().unwrap_or_else(|p| p.into_inner())
    }

    pub fn get_state(&self) -> UIState {
        self.read().clone()
    }

    pub fn route(&self) -> Route {
        self.read().route.clone()
    }

    pub fn should_exit(&self) -> bool {
        self.read().should_exit
    }

    pub fn reduce(&self, action: &Action) {
        let mut state = self.write();

        match action {
            Action::Navigate(route) => {
                state.route = route.clone();
                state.page_scroll = 0;
                state.sidebar_open = false;
            }
            Action::NavigateBack => {
                state.route = Route::Dashboard;
                state.page_scroll = 0;
            }
            Action::FocusPanel(panel_id) => {
                state.focused_panel = *panel_id;
            }
            Action::SelectWorker(_) => {
                // picking a worker closes the narrow-terminal drawer
                state.sidebar_open = false;
            }
            Action::ToggleSidebar => {
                state.sidebar_open = !state.sidebar_open;
            }
            Action::ToggleLogPanel => {
                state.log_panel_open = !state.log_panel_open;
            }
            Action::ToggleHelp => {
                state.show_help = !state.show_help;
            }
            Action::ToggleDiagnostics => {
                state.show_diagnostics = !state.show_diagnostics;
            }
            Action::ScrollPage(delta) => {
                state.page_scroll = if delta.is_negative() {
                    state.page_scroll.saturating_sub(delta.unsigned_abs())
                } else {
                    state.page_scroll.saturating_add(delta.unsigned_abs())
                };
            }
            Action::SignedOut => {
                state.signed_out = true;
            }
            Action::ShowError(message) => {
                state.error_message = Some(message.clone());
            }
            Action::ClearError => {
                state.error_message = None;
            }
            Action::Quit => {
                state.should_exit = true;
            }
            _ => {}
        }
    }
}
