/// Effects module handles side effects (timers, token storage, the log feed).
/// Effects are triggered by Actions and dispatch new Actions with results.
use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use chrono::{Local, NaiveTime};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;
use wf_api::TokenStore;
use wf_core::Route;
use wf_core::get_wf_setting;
use wf_core::models::LogLine;

/// How long an error stays in the footer
const ERROR_DISPLAY: Duration = Duration::from_secs(4);

pub struct Effects {
    dispatcher: Dispatcher,
    tokens: Arc<dyn TokenStore>,
    feed_lines: Vec<LogLine>,
}

/// Copy of a fixture line stamped as the `seq`th line of the live feed
pub fn replay_line(template: &LogLine, seq: usize, now: NaiveTime) -> LogLine {
    LogLine {
        id: format!("feed_{seq}"),
        timestamp: now,
        kind: template.kind,
        message: template.message.clone(),
    }
}

impl Effects {
    pub fn new(dispatcher: Dispatcher, tokens: Arc<dyn TokenStore>, feed_lines: Vec<LogLine>) -> Self {
        Self {
            dispatcher,
            tokens,
            feed_lines,
        }
    }

    /// Spawn background tasks. Must be called inside a tokio runtime.
    pub fn spawn_background_tasks(&self) {
        self.spawn_mock_feed();
    }

    /// Replay the fixture lines forever, one per interval, as if a worker
    /// were producing them
    fn spawn_mock_feed(&self) {
        if self.feed_lines.is_empty() {
            log::debug!("No fixture lines, log feed disabled");
            return;
        }
        let dispatcher = self.dispatcher.clone();
        let lines = self.feed_lines.clone();
        let interval_ms = get_wf_setting!(WF_MOCK_FEED_INTERVAL_MS, usize) as u64;

        task::spawn(async move {
            let mut seq = 0usize;
            loop {
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                let template = &lines[seq % lines.len()];
                let line = replay_line(template, seq, Local::now().time());
                seq += 1;
                dispatcher.dispatch(Action::LogLinesAppended(vec![line]));
            }
        });
    }

    /// Handle an action and execute any necessary side effects
    pub fn handle(&self, action: &Action) {
        match action {
            Action::DeleteWorker(worker_id) => {
                let delay = get_wf_setting!(WF_DELETE_REDIRECT_MS, usize) as u64;
                log::debug!("Redirecting away from {} in {}ms", worker_id, delay);
                self.dispatcher.dispatch_after(
                    Duration::from_millis(delay),
                    Action::Navigate(Route::Dashboard),
                );
            }
            Action::SignOut => self.sign_out(),
            Action::ShowError(_) => {
                self.dispatcher.dispatch_after(ERROR_DISPLAY, Action::ClearError);
            }
            _ => {}
        }
    }

    /// Clear the token pair off the event loop; a file store touches disk
    fn sign_out(&self) {
        let dispatcher = self.dispatcher.clone();
        let tokens = self.tokens.clone();

        task::spawn(async move {
            let result = task::spawn_blocking(move || tokens.clear()).await;
            match result {
                Ok(Ok(())) => {
                    log::info!("Signed out, token pair cleared");
                    dispatcher.dispatch(Action::SignedOut);
                }
                Ok(Err(e)) => {
                    log::error!("Failed to clear tokens: {}", e);
                    dispatcher.dispatch(Action::ShowError(format!("Sign out failed: {e}")));
                }
                Err(e) => {
                    log::error!("Sign out task failed: {}", e);
                    dispatcher.dispatch(Action::ShowError("Sign out failed".to_string()));
                }
            }
        });
    }
}
