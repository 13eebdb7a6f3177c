/// FleetStore holds the worker fleet with its local edits, the task and
/// screenshot records, and which worker is selected on the dashboard.
use crate::actions::Action;
use chrono::Utc;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use wf_core::exceptions::GenericError;
use wf_core::models::{OperatorProfile, Screenshot, Task, Worker};
use wf_core::{Fleet, MockData};

#[derive(Debug, Clone, PartialEq)]
pub struct FleetState {
    pub fleet: Fleet,
    pub tasks: Vec<Task>,
    pub screenshots: Vec<Screenshot>,
    pub profile: OperatorProfile,

    /// Worker shown in the live view and log panel
    pub selected_worker_id: Option<String>,

    /// Worker deleted from its detail page, until the page is left
    pub removed_worker_id: Option<String>,
}

#[derive(Clone)]
pub struct FleetStore {
    state: Arc<RwLock<FleetState>>,
}

impl FleetStore {
    pub fn new(data: MockData, max_workers: usize) -> Self {
        let fleet = Fleet::new(data.workers, max_workers);
        let selected_worker_id = fleet.workers().first().map(|w| w.id.clone());
        Self {
            state: Arc::new(RwLock::new(FleetState {
                fleet,
                tasks: data.tasks,
                screenshots: data.screenshots,
                profile: data.profile,
                selected_worker_id,
                removed_worker_id: None,
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, FleetState> {
        self.state.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FleetState> {
        self.state.write().unwrap_or_else(|p| p.into_inner())
    }

    pub fn get_state(&self) -> FleetState {
        self.read().clone()
    }

    /// Current workers with local edits applied
    pub fn workers(&self) -> Vec<Worker> {
        self.read().fleet.workers()
    }

    pub fn worker(&self, worker_id: &str) -> Option<Worker> {
        self.read().fleet.get(worker_id)
    }

    pub fn selected_worker(&self) -> Option<Worker> {
        let state = self.read();
        state
            .selected_worker_id
            .as_deref()
            .and_then(|id| state.fleet.get(id))
    }

    pub fn selected_index(&self) -> Option<usize> {
        let state = self.read();
        let id = state.selected_worker_id.as_deref()?;
        state.fleet.workers().iter().position(|w| w.id == id)
    }

    /// Spawning would stay within the worker limit
    pub fn check_spawn(&self) -> Result<(), GenericError> {
        let state = self.read();
        if state.fleet.workers().len() >= state.fleet.max_workers() {
            return Err(GenericError::WorkerLimitExceeded);
        }
        Ok(())
    }

    /// Worker may be started or stopped right now
    pub fn check_toggle(&self, worker_id: &str) -> Result<(), GenericError> {
        let worker = self
            .worker(worker_id)
            .ok_or_else(|| GenericError::WorkerNotFound(worker_id.to_string()))?;
        if !worker.status.can_toggle() {
            return Err(GenericError::ToggleNotAllowed {
                id: worker.id,
                status: worker.status,
            });
        }
        Ok(())
    }

    pub fn reduce(&self, action: &Action) {
        let mut state = self.write();

        match action {
            Action::SelectWorker(worker_id) => {
                if state.fleet.get(worker_id).is_some() {
                    state.selected_worker_id = Some(worker_id.clone());
                } else {
                    log::warn!("Ignoring selection of unknown worker {}", worker_id);
                }
            }

            Action::ToggleWorkerStatus(worker_id) => match state.fleet.toggle_status(worker_id) {
                Ok(status) => log::info!("Worker {} is now {}", worker_id, status),
                Err(e) => log::warn!("{}", e),
            },

            Action::DeleteWorker(worker_id) => match state.fleet.remove(worker_id) {
                Ok(worker) => {
                    log::info!("Removed worker {} ({})", worker.name, worker.id);
                    state.removed_worker_id = Some(worker.id);
                    if state.selected_worker_id.as_deref() == Some(worker_id.as_str()) {
                        state.selected_worker_id =
                            state.fleet.workers().first().map(|w| w.id.clone());
                    }
                }
                Err(e) => log::warn!("{}", e),
            },

            Action::SpawnWorker => match state.fleet.spawn(Utc::now()) {
                Ok(worker) => {
                    if state.selected_worker_id.is_none() {
                        state.selected_worker_id = Some(worker.id);
                    }
                }
                Err(e) => log::warn!("{}", e),
            },

            Action::Navigate(_) | Action::NavigateBack => {
                state.removed_worker_id = None;
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::models::WorkerStatus;

    fn store() -> FleetStore {
        FleetStore::new(MockData::load().unwrap(), 3)
    }

    #[test]
    fn test_first_worker_selected_initially() {
        let store = store();
        let first = store.workers()[0].clone();
        assert_eq!(store.selected_worker(), Some(first));
        assert_eq!(store.selected_index(), Some(0));
    }

    #[test]
    fn test_select_worker() {
        let store = store();
        let second = store.workers()[1].id.clone();
        store.reduce(&Action::SelectWorker(second.clone()));
        assert_eq!(store.get_state().selected_worker_id, Some(second));
        assert_eq!(store.selected_index(), Some(1));

        store.reduce(&Action::SelectWorker("wk_missing".to_string()));
        assert_eq!(store.selected_index(), Some(1));
    }

    #[test]
    fn test_toggle_rules() {
        let store = store();
        let busy = store
            .workers()
            .into_iter()
            .find(|w| w.status == WorkerStatus::Busy)
            .unwrap();
        assert!(matches!(
            store.check_toggle(&busy.id),
            Err(GenericError::ToggleNotAllowed { .. })
        ));
        store.reduce(&Action::ToggleWorkerStatus(busy.id.clone()));
        assert_eq!(store.worker(&busy.id).unwrap().status, WorkerStatus::Busy);

        let idle = store
            .workers()
            .into_iter()
            .find(|w| w.status == WorkerStatus::Idle)
            .unwrap();
        assert!(store.check_toggle(&idle.id).is_ok());
        store.reduce(&Action::ToggleWorkerStatus(idle.id.clone()));
        assert_eq!(store.worker(&idle.id).unwrap().status, WorkerStatus::Offline);
        store.reduce(&Action::ToggleWorkerStatus(idle.id.clone()));
        assert_eq!(store.worker(&idle.id).unwrap().status, WorkerStatus::Idle);

        // the fetched snapshot is untouched
        let state = store.get_state();
        let snapshot = state.fleet.snapshot().iter().find(|w| w.id == idle.id).unwrap();
        assert_eq!(snapshot.status, WorkerStatus::Idle);
    }

    #[test]
    fn test_delete_moves_selection_and_marks_removed() {
        let store = store();
        let first = store.workers()[0].id.clone();
        store.reduce(&Action::DeleteWorker(first.clone()));

        let state = store.get_state();
        assert_eq!(state.removed_worker_id, Some(first.clone()));
        assert!(store.worker(&first).is_none());
        assert_eq!(store.selected_index(), Some(0));
        assert_ne!(state.selected_worker_id, Some(first));

        store.reduce(&Action::NavigateBack);
        assert_eq!(store.get_state().removed_worker_id, None);
    }

    #[test]
    fn test_spawn_limit() {
        let store = store();
        assert_eq!(store.check_spawn(), Err(GenericError::WorkerLimitExceeded));
        store.reduce(&Action::SpawnWorker);
        assert_eq!(store.workers().len(), 3);

        let first = store.workers()[0].id.clone();
        store.reduce(&Action::DeleteWorker(first));
        assert!(store.check_spawn().is_ok());
        store.reduce(&Action::SpawnWorker);
        let workers = store.workers();
        assert_eq!(workers.len(), 3);
        assert_eq!(workers[2].status, WorkerStatus::Starting);
    }
}
