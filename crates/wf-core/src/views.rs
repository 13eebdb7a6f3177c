/// Derived views over fleet snapshots. Everything here is a pure function of its
/// inputs; callers recompute on every render.
use crate::models::{LogKind, LogLine, Screenshot, Task, TaskStatus, Worker, WorkerStatus};

pub fn find_worker<'a>(workers: &'a [Worker], worker_id: &str) -> Option<&'a Worker> {
    workers.iter().find(|w| w.id == worker_id)
}

/// Tasks owned by `worker_id`, in their original order
pub fn tasks_for_worker<'a>(tasks: &'a [Task], worker_id: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.worker_id == worker_id).collect()
}

/// Screenshots captured on `worker_id`, in their original order
pub fn screenshots_for_worker<'a>(
    screenshots: &'a [Screenshot],
    worker_id: &str,
) -> Vec<&'a Screenshot> {
    screenshots
        .iter()
        .filter(|s| s.worker_id == worker_id)
        .collect()
}

pub fn linked_task<'a>(tasks: &'a [Task], screenshot: &Screenshot) -> Option<&'a Task> {
    let task_id = screenshot.task_id.as_deref()?;
    tasks.iter().find(|t| t.id == task_id)
}

/// Lines shown in the log panel for the selected worker.
///
/// System lines are always shown; everything else only while the worker is
/// BUSY. This stands in for a per-worker log subscription until a real stream
/// exists.
pub fn visible_logs<'a>(selected: Option<&Worker>, lines: &'a [LogLine]) -> Vec<&'a LogLine> {
    let Some(worker) = selected else {
        return Vec::new();
    };
    let busy = worker.status == WorkerStatus::Busy;
    lines
        .iter()
        .filter(|l| busy || l.kind == LogKind::System)
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogCounts {
    pub lines: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// Badge counts for a set of real log lines
pub fn log_counts<'a>(lines: impl IntoIterator<Item = &'a LogLine>) -> LogCounts {
    lines.into_iter().fold(LogCounts::default(), |mut acc, l| {
        acc.lines += 1;
        match l.kind {
            LogKind::Error => acc.errors += 1,
            LogKind::Warn => acc.warnings += 1,
            _ => {}
        }
        acc
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FleetSummary {
    pub total: usize,
    pub online: usize,
    pub busy: usize,
    pub starting: usize,
}

pub fn fleet_summary(workers: &[Worker]) -> FleetSummary {
    FleetSummary {
        total: workers.len(),
        online: workers.iter().filter(|w| w.status.is_online()).count(),
        busy: workers
            .iter()
            .filter(|w| w.status == WorkerStatus::Busy)
            .count(),
        starting: workers
            .iter()
            .filter(|w| w.status == WorkerStatus::Starting)
            .count(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerActivity {
    pub completed_tasks: u32,
    pub total_tasks: usize,
    pub failed_tasks: usize,
    pub screenshots: usize,
}

pub fn worker_activity(
    worker: &Worker,
    tasks: &[Task],
    screenshots: &[Screenshot],
) -> WorkerActivity {
    let owned = tasks_for_worker(tasks, &worker.id);
    WorkerActivity {
        completed_tasks: worker.completed_tasks,
        total_tasks: owned.len(),
        failed_tasks: owned
            .iter()
            .filter(|t| t.status == TaskStatus::Failed)
            .count(),
        screenshots: screenshots_for_worker(screenshots, &worker.id).len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::Skill;
    use chrono::{NaiveTime, TimeZone, Utc};

    fn worker(id: &str, status: WorkerStatus) -> Worker {
        Worker {
            id: id.to_string(),
            name: id.to_string(),
            status,
            port: 5901,
            created_at: Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap(),
            completed_tasks: 0,
            current_task: None,
        }
    }

    fn task(id: &str, worker_id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            worker_id: worker_id.to_string(),
            description: format!("task {id}"),
            skill: Skill::Planner,
            status,
            created_at: Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap(),
            duration_sec: None,
        }
    }

    fn line(id: &str, kind: LogKind) -> LogLine {
        LogLine {
            id: id.to_string(),
            timestamp: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            kind,
            message: id.to_string(),
        }
    }

    #[test]
    fn test_tasks_filter_keeps_order() {
        let tasks = vec![
            task("t1", "a", TaskStatus::Completed),
            task("t2", "b", TaskStatus::Completed),
            task("t3", "a", TaskStatus::Failed),
            task("t4", "c", TaskStatus::Queued),
            task("t5", "a", TaskStatus::Queued),
        ];
        let ids: Vec<&str> = tasks_for_worker(&tasks, "a")
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["t1", "t3", "t5"]);
        assert!(tasks_for_worker(&tasks, "zzz").is_empty());
    }

    #[test]
    fn test_screenshots_filter_and_link() {
        let tasks = vec![task("t1", "a", TaskStatus::Completed)];
        let shot = |id: &str, worker_id: &str, task_id: Option<&str>| Screenshot {
            id: id.to_string(),
            worker_id: worker_id.to_string(),
            task_id: task_id.map(str::to_string),
            index: 1,
            captured_at: Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap(),
        };
        let shots = vec![
            shot("s1", "a", Some("t1")),
            shot("s2", "b", None),
            shot("s3", "a", Some("missing")),
        ];
        let mine = screenshots_for_worker(&shots, "a");
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, "s1");
        assert_eq!(mine[1].id, "s3");
        assert_eq!(linked_task(&tasks, mine[0]).map(|t| t.id.as_str()), Some("t1"));
        assert!(linked_task(&tasks, mine[1]).is_none());
    }

    #[test]
    fn test_visible_logs_follow_busy_status() {
        let lines = vec![
            line("l1", LogKind::System),
            line("l2", LogKind::Info),
            line("l3", LogKind::Error),
            line("l4", LogKind::System),
        ];
        let busy = worker("a", WorkerStatus::Busy);
        let idle = worker("b", WorkerStatus::Idle);

        assert_eq!(visible_logs(Some(&busy), &lines).len(), 4);
        let idle_ids: Vec<&str> = visible_logs(Some(&idle), &lines)
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(idle_ids, vec!["l1", "l4"]);
        assert!(visible_logs(None, &lines).is_empty());
    }

    #[test]
    fn test_log_counts() {
        let lines = vec![
            line("l1", LogKind::Error),
            line("l2", LogKind::Warn),
            line("l3", LogKind::Error),
            line("l4", LogKind::Success),
        ];
        let counts = log_counts(&lines);
        assert_eq!(
            counts,
            LogCounts {
                lines: 4,
                errors: 2,
                warnings: 1
            }
        );
    }

    #[test]
    fn test_fleet_summary_and_activity() {
        let workers = vec![
            worker("a", WorkerStatus::Busy),
            worker("b", WorkerStatus::Starting),
            worker("c", WorkerStatus::Offline),
        ];
        let summary = fleet_summary(&workers);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.online, 2);
        assert_eq!(summary.busy, 1);
        assert_eq!(summary.starting, 1);

        let tasks = vec![
            task("t1", "a", TaskStatus::Failed),
            task("t2", "a", TaskStatus::Completed),
            task("t3", "b", TaskStatus::Failed),
        ];
        let activity = worker_activity(&workers[0], &tasks, &[]);
        assert_eq!(activity.total_tasks, 2);
        assert_eq!(activity.failed_tasks, 1);
        assert_eq!(activity.screenshots, 0);
    }
}
