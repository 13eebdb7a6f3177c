/// Plain records describing the fleet. Field names serialize in camelCase so a
/// fixture or API payload can be decoded directly.
use crate::skills::Skill;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkerStatus {
    Busy,
    Idle,
    Starting,
    Offline,
}

impl WorkerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Busy => "BUSY",
            Self::Idle => "IDLE",
            Self::Starting => "STARTING",
            Self::Offline => "OFFLINE",
        }
    }

    /// Anything but OFFLINE counts towards the "online" and "active" figures
    pub fn is_online(&self) -> bool {
        *self != Self::Offline
    }

    /// Only idle and offline workers can be started or stopped by hand
    pub fn can_toggle(&self) -> bool {
        matches!(self, Self::Idle | Self::Offline)
    }
}

impl fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: String,
    pub name: String,
    pub status: WorkerStatus,
    pub port: u16,
    pub created_at: DateTime<Utc>,
    pub completed_tasks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_task: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "QUEUED",
            Self::Processing => "PROCESSING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub worker_id: String,
    pub description: String,
    pub skill: Skill,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenshot {
    pub id: String,
    pub worker_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub index: u32,
    pub captured_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Success,
    Error,
    Warn,
    System,
}

impl LogKind {
    /// Single-column prefix drawn before each log message
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Info => "·",
            Self::Success => "✓",
            Self::Error => "✗",
            Self::Warn => "!",
            Self::System => "▸",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogLine {
    pub id: String,
    pub timestamp: NaiveTime,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub message: String,
}

/// The signed-in operator shown on the profile page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub joined_at: NaiveDate,
    pub access_token: String,
    pub access_expires_in: String,
    pub refresh_expires_in: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_wire_format() {
        let raw = r#"{
            "id": "wk_01",
            "name": "alpha",
            "status": "BUSY",
            "port": 5901,
            "createdAt": "2026-02-03T09:15:00Z",
            "completedTasks": 4,
            "currentTask": "Scrape pricing pages"
        }"#;
        let worker: Worker = serde_json::from_str(raw).unwrap();
        assert_eq!(worker.status, WorkerStatus::Busy);
        assert_eq!(worker.current_task.as_deref(), Some("Scrape pricing pages"));

        let back = serde_json::to_value(&worker).unwrap();
        assert_eq!(back["completedTasks"], 4);
        assert_eq!(back["status"], "BUSY");
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let raw = r#"{
            "id": "tsk_1",
            "workerId": "wk_01",
            "description": "Plan",
            "skill": "planner",
            "status": "QUEUED",
            "createdAt": "2026-02-03T09:15:00Z"
        }"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.duration_sec, None);
        assert_eq!(task.skill, Skill::Planner);
    }

    #[test]
    fn test_log_line_type_field() {
        let raw = r#"{"id":"l1","timestamp":"14:02:11","type":"warn","message":"slow"}"#;
        let line: LogLine = serde_json::from_str(raw).unwrap();
        assert_eq!(line.kind, LogKind::Warn);
        assert_eq!(line.kind.glyph(), "!");
    }

    #[test]
    fn test_toggle_rules() {
        assert!(WorkerStatus::Idle.can_toggle());
        assert!(WorkerStatus::Offline.can_toggle());
        assert!(!WorkerStatus::Busy.can_toggle());
        assert!(!WorkerStatus::Starting.can_toggle());
        assert!(!WorkerStatus::Offline.is_online());
    }
}
