/// LogPanelStore owns the log feed and the follow/scroll state of the log panel.
///
/// The panel's content is derived from the feed and the worker selected in the
/// FleetStore, so the store re-derives it after every action. One row per line,
/// plus one row for the cursor glyph whenever there is at least one line.
use crate::actions::Action;
use crate::stores::FleetStore;
use ratatui::layout::Rect;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use wf_core::models::{LogLine, Worker};
use wf_core::views::visible_logs;
use wf_core::LogFollow;

/// Oldest feed lines are dropped past this point
const MAX_FEED_LINES: usize = 2_000;

#[derive(Debug, Clone, PartialEq)]
pub struct LogPanelState {
    /// Everything received on the feed, oldest first
    pub lines: Vec<LogLine>,

    /// Worker whose stream the panel currently shows
    pub stream_worker_id: Option<String>,

    pub follow: LogFollow,

    /// Where the panel and its jump marker were last drawn, for mouse hits
    pub panel_area: Option<Rect>,
    pub jump_area: Option<Rect>,
}

#[derive(Clone)]
pub struct LogPanelStore {
    state: Arc<RwLock<LogPanelState>>,
    fleet_store: FleetStore,
}

/// Scroll height of the panel for `line_count` visible lines
pub fn content_rows(line_count: usize) -> usize {
    if line_count == 0 { 0 } else { line_count + 1 }
}

impl LogPanelStore {
    pub fn new(fleet_store: FleetStore, lines: Vec<LogLine>, threshold_rows: usize) -> Self {
        let store = Self {
            state: Arc::new(RwLock::new(LogPanelState {
                lines,
                stream_worker_id: None,
                follow: LogFollow::new(threshold_rows),
                panel_area: None,
                jump_area: None,
            })),
            fleet_store,
        };
        {
            let mut state = store.write();
            store.sync(&mut state);
        }
        store
    }

    fn read(&self) -> RwLockReadGuard<'_, LogPanelState> {
        self.state.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, LogPanelState> {
        self.state.write().unwrap_or_else(|p| p.into_inner())
    }

    pub fn get_state(&self) -> LogPanelState {
        self.read().clone()
    }

    pub fn follow(&self) -> LogFollow {
        self.read().follow.clone()
    }

    pub fn is_animating(&self) -> bool {
        self.read().follow.is_animating()
    }

    /// The selected worker and the lines the panel shows for it
    pub fn visible(&self) -> (Option<Worker>, Vec<LogLine>) {
        let selected = self.fleet_store.selected_worker();
        let state = self.read();
        let lines = visible_logs(selected.as_ref(), &state.lines)
            .into_iter()
            .cloned()
            .collect();
        (selected, lines)
    }

    /// Called by the renderer with the rows available for log lines
    pub fn set_viewport(&self, rows: usize) {
        self.write().follow.set_viewport(rows);
    }

    pub fn set_hit_areas(&self, panel: Option<Rect>, jump: Option<Rect>) {
        let mut state = self.write();
        state.panel_area = panel;
        state.jump_area = jump;
    }

    /// Re-derive the panel content after the feed or the selection changed
    fn sync(&self, state: &mut LogPanelState) {
        let selected = self.fleet_store.selected_worker();
        let stream_worker_id = selected.as_ref().map(|w| w.id.clone());
        let rows = content_rows(visible_logs(selected.as_ref(), &state.lines).len());

        if stream_worker_id != state.stream_worker_id {
            state.stream_worker_id = stream_worker_id;
            state.follow.reset_stream(rows);
        } else if rows != state.follow.scroll_height() {
            state.follow.content_changed(rows);
        }
    }

    pub fn reduce(&self, action: &Action) {
        let mut state = self.write();

        match action {
            Action::LogLinesAppended(lines) => {
                state.lines.extend(lines.iter().cloned());
                let overflow = state.lines.len().saturating_sub(MAX_FEED_LINES);
                if overflow > 0 {
                    state.lines.drain(..overflow);
                }
            }
            Action::ScrollLogs(delta) => {
                state.follow.scroll_by(*delta);
            }
            Action::JumpToLatest => {
                state.follow.jump_to_latest();
            }
            Action::Tick => {
                state.follow.tick();
            }
            _ => {}
        }

        self.sync(&mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use wf_core::MockData;
    use wf_core::models::{LogKind, WorkerStatus};

    fn line(n: usize, kind: LogKind) -> LogLine {
        LogLine {
            id: format!("t_{n}"),
            timestamp: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            kind,
            message: format!("line {n}"),
        }
    }

    fn stores() -> (FleetStore, LogPanelStore) {
        let data = MockData::load().unwrap();
        let lines = data.log_lines.clone();
        let fleet = FleetStore::new(data, 3);
        let panel = LogPanelStore::new(fleet.clone(), lines, 2);
        panel.set_viewport(5);
        (fleet, panel)
    }

    /// Dispatch to both stores in the order the App does
    fn dispatch(fleet: &FleetStore, panel: &LogPanelStore, action: Action) {
        fleet.reduce(&action);
        panel.reduce(&action);
    }

    fn settle(panel: &LogPanelStore) {
        while panel.is_animating() {
            panel.reduce(&Action::Tick);
        }
    }

    #[test]
    fn test_starts_at_bottom_of_busy_worker() {
        let (fleet, panel) = stores();
        assert_eq!(fleet.selected_worker().unwrap().status, WorkerStatus::Busy);
        let (_, lines) = panel.visible();
        let follow = panel.follow();
        assert_eq!(follow.scroll_height(), lines.len() + 1);
        assert_eq!(follow.scroll_top() + 5, follow.scroll_height());
        assert!(follow.is_at_bottom());
    }

    #[test]
    fn test_follows_new_lines_at_bottom() {
        let (fleet, panel) = stores();
        dispatch(&fleet, &panel, Action::LogLinesAppended(vec![line(1, LogKind::Info)]));
        dispatch(&fleet, &panel, Action::LogLinesAppended(vec![line(2, LogKind::Error)]));
        settle(&panel);
        let follow = panel.follow();
        assert_eq!(follow.scroll_top() + 5, follow.scroll_height());
        assert!(!follow.show_jump_button());
    }

    #[test]
    fn test_scrolled_up_reader_is_left_alone() {
        let (fleet, panel) = stores();
        dispatch(&fleet, &panel, Action::ScrollLogs(-6));
        let before = panel.follow();
        assert!(before.show_jump_button());

        dispatch(&fleet, &panel, Action::LogLinesAppended(vec![line(1, LogKind::Warn)]));
        let after = panel.follow();
        assert_eq!(after.scroll_top(), before.scroll_top());
        assert_eq!(after.scroll_height(), before.scroll_height() + 1);
        assert!(after.show_jump_button());

        dispatch(&fleet, &panel, Action::JumpToLatest);
        assert!(!panel.follow().is_at_bottom());
        settle(&panel);
        assert!(panel.follow().is_at_bottom());
        assert!(!panel.follow().show_jump_button());
    }

    #[test]
    fn test_switching_worker_resets_stream() {
        let (fleet, panel) = stores();
        dispatch(&fleet, &panel, Action::ScrollLogs(-6));
        assert!(panel.follow().show_jump_button());

        let idle = fleet.workers()[1].id.clone();
        dispatch(&fleet, &panel, Action::SelectWorker(idle.clone()));
        let follow = panel.follow();
        assert!(follow.is_at_bottom());
        assert!(!follow.show_jump_button());
        assert!(!follow.is_animating());
        assert_eq!(panel.get_state().stream_worker_id, Some(idle));

        // an idle worker only shows system lines
        let (_, lines) = panel.visible();
        assert!(lines.iter().all(|l| l.kind == LogKind::System));
    }

    #[test]
    fn test_feed_is_capped() {
        let (fleet, panel) = stores();
        let batch: Vec<LogLine> = (0..MAX_FEED_LINES + 10)
            .map(|n| line(n, LogKind::Info))
            .collect();
        dispatch(&fleet, &panel, Action::LogLinesAppended(batch));
        let state = panel.get_state();
        assert_eq!(state.lines.len(), MAX_FEED_LINES);
        assert_eq!(state.lines.last().unwrap().id, format!("t_{}", MAX_FEED_LINES + 9));
    }

    #[test]
    fn test_content_rows() {
        assert_eq!(content_rows(0), 0);
        assert_eq!(content_rows(3), 4);
    }
}
