/// Plain-text listings of the bundled fleet: `wf workers`, `wf tasks`,
/// `wf screenshots`
use wf_core::MockData;
use wf_core::exceptions::GenericError;
use wf_core::format::{format_capture_time, format_duration, format_short_date, pluralize};
use wf_core::views::{find_worker, fleet_summary, linked_task, screenshots_for_worker, tasks_for_worker};

pub fn workers_listing(data: &MockData, max_workers: usize) -> String {
    let summary = fleet_summary(&data.workers);
    let mut out = format!(
        "{:<11} {:<10} {:<9} {:<6} {:>5}  {}\n",
        "ID", "NAME", "STATUS", "PORT", "DONE", "CURRENT TASK"
    );
    for w in &data.workers {
        out.push_str(&format!(
            "{:<11} {:<10} {:<9} {:<6} {:>5}  {}\n",
            w.id,
            w.name,
            w.status.as_str(),
            w.port,
            w.completed_tasks,
            w.current_task.as_deref().unwrap_or("-")
        ));
    }
    out.push_str(&format!(
        "\n{} online · {} processing · {}/{} workers\n",
        summary.online, summary.busy, summary.total, max_workers
    ));
    out
}

pub fn tasks_listing(data: &MockData, worker_id: &str) -> Result<String, GenericError> {
    let worker = find_worker(&data.workers, worker_id)
        .ok_or_else(|| GenericError::WorkerNotFound(worker_id.to_string()))?;
    let tasks = tasks_for_worker(&data.tasks, worker_id);

    let mut out = format!("{}: {} total\n", worker.name, pluralize(tasks.len(), "task"));
    if tasks.is_empty() {
        out.push_str("no tasks recorded\n");
    }
    for t in tasks {
        out.push_str(&format!(
            "{:<10} {:<11} {:<16} {:<14} {:>7}  {}\n",
            t.id,
            t.status.as_str(),
            t.skill.info().label,
            format_short_date(&t.created_at),
            t.duration_sec.map(format_duration).unwrap_or_default(),
            t.description
        ));
    }
    Ok(out)
}

pub fn screenshots_listing(data: &MockData, worker_id: &str) -> Result<String, GenericError> {
    let worker = find_worker(&data.workers, worker_id)
        .ok_or_else(|| GenericError::WorkerNotFound(worker_id.to_string()))?;
    let shots = screenshots_for_worker(&data.screenshots, worker_id);

    let mut out = format!("{}: {}\n", worker.name, pluralize(shots.len(), "capture"));
    if shots.is_empty() {
        out.push_str("no screenshots captured\n");
    }
    for s in shots {
        let task = linked_task(&data.tasks, s)
            .map(|t| t.description.as_str())
            .unwrap_or("-");
        out.push_str(&format!(
            "#{:03}  {}  {:<9} {}\n",
            s.index,
            format_capture_time(&s.captured_at),
            s.id,
            task
        ));
    }
    Ok(out)
}
