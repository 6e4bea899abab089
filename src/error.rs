//! Error types shared by the solver, the dataset loader and the executors.

/// Errors that can occur while loading cities or running the search.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("at least one of max same, max duration or max generations must be positive")]
    Unbounded,
    #[error("problem contains no cities")]
    EmptyProblem,
    #[error("malformed dataset record {index}: {reason}")]
    Dataset { index: usize, reason: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("worker {index} failed: {reason}")]
    WorkerFailed { index: usize, reason: String },
    #[error("nothing to reduce")]
    EmptyReduce,
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
