/// The operator's view of the fleet: a snapshot as delivered by the data source,
/// plus local edits that have not been confirmed by any server. The snapshot is
/// never mutated in place so both can be told apart once a backend exists.
use crate::exceptions::GenericError;
use crate::models::{Worker, WorkerStatus};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

const CALLSIGNS: [&str; 8] = [
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel",
];
const FIRST_VNC_PORT: u16 = 5901;

/// Optimistic, client-side only changes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalEdits {
    pub status_overrides: HashMap<String, WorkerStatus>,
    pub removed: HashSet<String>,
    pub spawned: Vec<Worker>,
}

impl LocalEdits {
    pub fn is_empty(&self) -> bool {
        self.status_overrides.is_empty() && self.removed.is_empty() && self.spawned.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fleet {
    snapshot: Vec<Worker>,
    edits: LocalEdits,
    max_workers: usize,
}

impl Fleet {
    pub fn new(snapshot: Vec<Worker>, max_workers: usize) -> Self {
        Self {
            snapshot,
            edits: LocalEdits::default(),
            max_workers,
        }
    }

    pub fn snapshot(&self) -> &[Worker] {
        &self.snapshot
    }

    pub fn edits(&self) -> &LocalEdits {
        &self.edits
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Swap in a fresh snapshot. Local edits are kept on top of it.
    pub fn replace_snapshot(&mut self, snapshot: Vec<Worker>) {
        self.snapshot = snapshot;
    }

    pub fn discard_edits(&mut self) {
        self.edits = LocalEdits::default();
    }

    /// Snapshot with local edits applied, spawned workers last
    pub fn workers(&self) -> Vec<Worker> {
        self.snapshot
            .iter()
            .chain(self.edits.spawned.iter())
            .filter(|w| !self.edits.removed.contains(&w.id))
            .map(|w| {
                let mut worker = w.clone();
                if let Some(status) = self.edits.status_overrides.get(&w.id) {
                    worker.status = *status;
                }
                worker
            })
            .collect()
    }

    pub fn get(&self, worker_id: &str) -> Option<Worker> {
        self.workers().into_iter().find(|w| w.id == worker_id)
    }

    /// Start an offline worker or stop an idle one. Returns the new status.
    pub fn toggle_status(&mut self, worker_id: &str) -> Result<WorkerStatus, GenericError> {
        let worker = self
            .get(worker_id)
            .ok_or_else(|| GenericError::WorkerNotFound(worker_id.to_string()))?;
        let next = match worker.status {
            WorkerStatus::Offline => WorkerStatus::Idle,
            WorkerStatus::Idle => WorkerStatus::Offline,
            status => {
                return Err(GenericError::ToggleNotAllowed {
                    id: worker.id,
                    status,
                });
            }
        };
        self.edits
            .status_overrides
            .insert(worker.id.clone(), next);
        Ok(next)
    }

    pub fn remove(&mut self, worker_id: &str) -> Result<Worker, GenericError> {
        let worker = self
            .get(worker_id)
            .ok_or_else(|| GenericError::WorkerNotFound(worker_id.to_string()))?;
        self.edits.removed.insert(worker.id.clone());
        self.edits.status_overrides.remove(&worker.id);
        Ok(worker)
    }

    /// Add a STARTING worker if the operator is below the worker limit
    pub fn spawn(&mut self, now: DateTime<Utc>) -> Result<Worker, GenericError> {
        let current = self.workers();
        if current.len() >= self.max_workers {
            return Err(GenericError::WorkerLimitExceeded);
        }

        let taken: HashSet<&str> = self
            .snapshot
            .iter()
            .chain(self.edits.spawned.iter())
            .map(|w| w.name.as_str())
            .collect();
        let name = CALLSIGNS
            .iter()
            .find(|c| !taken.contains(**c))
            .map(|c| c.to_string())
            .unwrap_or_else(|| format!("worker-{}", self.edits.spawned.len() + 1));

        let port = self
            .snapshot
            .iter()
            .chain(self.edits.spawned.iter())
            .map(|w| w.port)
            .max()
            .map_or(FIRST_VNC_PORT, |p| p + 1);

        let worker = Worker {
            id: format!("wk_local_{}", self.edits.spawned.len() + 1),
            name,
            status: WorkerStatus::Starting,
            port,
            created_at: now,
            completed_tasks: 0,
            current_task: None,
        };
        log::info!("Spawned local worker {} on :{}", worker.name, worker.port);
        self.edits.spawned.push(worker.clone());
        Ok(worker)
    }
}
