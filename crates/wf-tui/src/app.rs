/// Main application struct and event loop
use crate::actions::Action;
use crate::dispatcher::{ActionReceiver, Dispatcher};
use crate::effects::Effects;
use crate::keyboard;
use crate::logger::LogBuffer;
use crate::stores::{AppLogsStore, FleetStore, LogPanelStore, UIStore};
use crate::ui::{Breakpoints, render_layout};
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use wf_api::TokenStore;
use wf_core::exceptions::GenericError;
use wf_core::{MockData, Route, get_wf_setting};

/// The main application structure following flux architecture
pub struct App {
    /// Dispatcher for sending actions
    dispatcher: Dispatcher,

    /// Store for navigation, panels and overlays
    ui_store: UIStore,

    /// Store for the fleet and the selection
    fleet_store: FleetStore,

    /// Store for the task output panel
    log_panel_store: LogPanelStore,

    /// Store for application logs
    app_logs_store: AppLogsStore,

    breakpoints: Breakpoints,

    /// Effects handler for side effects
    effects: Effects,
}

impl App {
    /// Build the console on the bundled fixture, capture logs in memory and
    /// start the background feed. Must be called inside a tokio runtime.
    pub fn new(
        route: Route,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<(Self, ActionReceiver), GenericError> {
        let log_buffer = crate::logger::init_memory_logger();
        let data = MockData::load()?;
        let (app, action_receiver) = Self::build(route, data, tokens, log_buffer, Breakpoints::from_settings());
        app.effects.spawn_background_tasks();
        Ok((app, action_receiver))
    }

    pub(crate) fn build(
        route: Route,
        data: MockData,
        tokens: Arc<dyn TokenStore>,
        log_buffer: LogBuffer,
        breakpoints: Breakpoints,
    ) -> (Self, ActionReceiver) {
        let (dispatcher, action_receiver) = Dispatcher::new();
        let feed_lines = data.log_lines.clone();
        let initial_lines = data.log_lines.clone();
        let max_workers = get_wf_setting!(WF_MAX_WORKERS, usize);
        let threshold = get_wf_setting!(WF_LOG_BOTTOM_THRESHOLD_ROWS, usize);

        let fleet_store = FleetStore::new(data, max_workers);
        let ui_store = UIStore::new(route);
        let log_panel_store = LogPanelStore::new(fleet_store.clone(), initial_lines, threshold);
        let app_logs_store = AppLogsStore::new(log_buffer);
        let effects = Effects::new(dispatcher.clone(), tokens, feed_lines);

        (
            Self {
                dispatcher,
                ui_store,
                fleet_store,
                log_panel_store,
                app_logs_store,
                breakpoints,
                effects,
            },
            action_receiver,
        )
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut crate::tui::Tui,
        mut action_receiver: ActionReceiver,
    ) -> io::Result<()> {
        log::info!("Worker Factory console started on {}", self.ui_store.route());
        let tick = Duration::from_millis(get_wf_setting!(WF_TUI_TICK_MS, usize) as u64);

        loop {
            // Render the UI
            terminal.draw(|frame| {
                render_layout(
                    frame,
                    &self.breakpoints,
                    &self.ui_store,
                    &self.fleet_store,
                    &self.log_panel_store,
                    &self.app_logs_store,
                );
            })?;

            // Check if we should exit
            if self.ui_store.should_exit() {
                break;
            }

            tokio::select! {
                // Poll for keyboard and mouse events, and advance the log scroll
                _ = tokio::time::sleep(tick) => {
                    if self.log_panel_store.is_animating() {
                        self.reduce(&Action::Tick);
                    }
                    if event::poll(Duration::from_millis(0))? {
                        match event::read()? {
                            Event::Key(key_event) => {
                                // Only process key press events (not release)
                                if key_event.kind == KeyEventKind::Press {
                                    if let Some(action) = keyboard::handle_key_event(
                                        key_event,
                                        &self.ui_store,
                                        &self.fleet_store,
                                        &self.app_logs_store,
                                    ) {
                                        self.dispatcher.dispatch(action);
                                    }
                                }
                            }
                            Event::Mouse(mouse_event) => {
                                if let Some(action) = keyboard::handle_mouse_event(
                                    mouse_event,
                                    &self.ui_store,
                                    &self.log_panel_store,
                                ) {
                                    self.dispatcher.dispatch(action);
                                }
                            }
                            _ => {}
                        }
                    }
                }

                // Process actions from the dispatcher
                Some(action) = action_receiver.recv() => {
                    self.handle_action(&action);
                }
            }
        }

        Ok(())
    }

    /// Handle an action by routing it to stores and effects
    fn handle_action(&mut self, action: &Action) {
        log::debug!("Handling action: {:?}", action);
        self.reduce(action);

        // Trigger side effects
        self.effects.handle(action);
    }

    /// Route to stores (reducers). The fleet goes first so the log panel sees
    /// the new selection.
    fn reduce(&self, action: &Action) {
        self.fleet_store.reduce(action);
        self.ui_store.reduce(action);
        self.log_panel_store.reduce(action);
        self.app_logs_store.reduce(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_api::MemoryTokenStore;
    use wf_core::models::WorkerStatus;

    fn app(route: Route) -> (App, ActionReceiver) {
        App::build(
            route,
            MockData::load().unwrap(),
            Arc::new(MemoryTokenStore::with_tokens("access", "refresh")),
            LogBuffer::with_capacity(100),
            Breakpoints {
                sm: 60,
                lg: 100,
                xl: 140,
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_flow_redirects_to_dashboard() {
        let (mut app, mut rx) = app(Route::WorkerDetail("wk_b81c04".to_string()));
        app.handle_action(&Action::DeleteWorker("wk_b81c04".to_string()));

        assert!(app.fleet_store.worker("wk_b81c04").is_none());
        let redirect = rx.recv().await.unwrap();
        assert_eq!(redirect, Action::Navigate(Route::Dashboard));

        app.handle_action(&redirect);
        assert_eq!(app.ui_store.route(), Route::Dashboard);
        assert_eq!(app.fleet_store.get_state().removed_worker_id, None);
    }

    #[tokio::test]
    async fn test_selection_switches_log_stream() {
        let (mut app, _rx) = app(Route::Dashboard);
        let (worker, lines) = app.log_panel_store.visible();
        assert_eq!(worker.unwrap().status, WorkerStatus::Busy);
        let busy_count = lines.len();

        app.handle_action(&Action::SelectWorker("wk_b81c04".to_string()));
        let (worker, lines) = app.log_panel_store.visible();
        assert_eq!(worker.unwrap().id, "wk_b81c04");
        // idle workers only show system lines
        assert!(lines.len() < busy_count);
        assert_eq!(
            app.log_panel_store.get_state().stream_worker_id.as_deref(),
            Some("wk_b81c04")
        );
    }

    #[tokio::test]
    async fn test_sign_out_round_trip() {
        let (mut app, mut rx) = app(Route::Profile);
        app.handle_action(&Action::SignOut);
        let signed_out = rx.recv().await.unwrap();
        assert_eq!(signed_out, Action::SignedOut);
        app.handle_action(&signed_out);
        assert!(app.ui_store.get_state().signed_out);
    }
}
