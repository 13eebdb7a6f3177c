/// Bundled fixture standing in for the fleet API. It is decoded through the same
/// serde models an API payload would use.
use crate::exceptions::GenericError;
use crate::models::{LogLine, OperatorProfile, Screenshot, Task, Worker};
use serde::{Deserialize, Serialize};

const MOCK_DATA_JSON: &str = include_str!("../fixtures/mock_data.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockData {
    pub workers: Vec<Worker>,
    pub tasks: Vec<Task>,
    pub screenshots: Vec<Screenshot>,
    pub log_lines: Vec<LogLine>,
    pub profile: OperatorProfile,
}

impl MockData {
    pub fn load() -> Result<Self, GenericError> {
        Self::from_json(MOCK_DATA_JSON)
    }

    pub fn from_json(raw: &str) -> Result<Self, GenericError> {
        serde_json::from_str(raw).map_err(|e| GenericError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{find_worker, tasks_for_worker};

    #[test]
    fn test_bundled_fixture_loads() {
        let data = MockData::load().unwrap();
        assert_eq!(data.workers.len(), 3);
        assert!(!data.log_lines.is_empty());
    }

    #[test]
    fn test_fixture_foreign_keys_resolve() {
        let data = MockData::load().unwrap();
        for task in &data.tasks {
            assert!(find_worker(&data.workers, &task.worker_id).is_some());
        }
        for shot in &data.screenshots {
            assert!(find_worker(&data.workers, &shot.worker_id).is_some());
        }
        let offline = &data.workers[2];
        assert!(tasks_for_worker(&data.tasks, &offline.id).is_empty());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            MockData::from_json("{"),
            Err(GenericError::ParseError(_))
        ));
    }
}
