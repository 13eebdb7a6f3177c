/// AppLogsStore backs the diagnostics overlay with the console's own log records
use crate::actions::Action;
use crate::logger::{LogBuffer, LogEntry};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Entries pulled from the buffer for display
const DIAGNOSTICS_WINDOW: usize = 500;

#[derive(Debug, Clone, Default)]
pub struct AppLogsState {
    pub entries: Vec<LogEntry>,

    /// Rows scrolled up from the newest entry
    pub scroll_offset: usize,
}

#[derive(Clone)]
pub struct AppLogsStore {
    state: Arc<RwLock<AppLogsState>>,
    log_buffer: LogBuffer,
}

impl AppLogsStore {
    pub fn new(log_buffer: LogBuffer) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppLogsState::default())),
            log_buffer,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, AppLogsState> {
        self.state.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AppLogsState> {
        self.state.write().unwrap_or_else(|p| p.into_inner())
    }

    pub fn get_state(&self) -> AppLogsState {
        self.read().clone()
    }

    /// Pull the latest entries whenever the overlay is opened
    pub fn reduce(&self, action: &Action) {
        if let Action::ToggleDiagnostics = action {
            self.refresh();
            self.scroll_to_bottom();
        }
    }

    pub fn refresh(&self) {
        let entries = self.log_buffer.recent(DIAGNOSTICS_WINDOW);
        self.write().entries = entries;
    }

    pub fn scroll_up(&self, amount: usize) {
        let mut state = self.write();
        let max = state.entries.len();
        state.scroll_offset = state.scroll_offset.saturating_add(amount).min(max);
    }

    pub fn scroll_down(&self, amount: usize) {
        let mut state = self.write();
        state.scroll_offset = state.scroll_offset.saturating_sub(amount);
    }

    pub fn scroll_to_bottom(&self) {
        self.write().scroll_offset = 0;
    }
}
