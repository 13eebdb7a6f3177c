use crate::models::WorkerStatus;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum GenericError {
    #[error("ParseError: {0}")]
    ParseError(String),

    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Worker not found: {0}")]
    WorkerNotFound(String),

    #[error("Maximum number of workers reached.")]
    WorkerLimitExceeded,

    #[error("Worker {id} is {status} and cannot be started or stopped")]
    ToggleNotAllowed { id: String, status: WorkerStatus },
}
