use thiserror::Error;

#[derive(Error, Debug)]
pub enum RespiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Plan error: {0}")]
    PlanError(String),

    #[error("No break at index {index} (planner holds {len})")]
    BreakIndex { index: usize, len: usize },
}

impl RespiteError {
    pub fn plan(msg: impl Into<String>) -> Self {
        RespiteError::PlanError(msg.into())
    }
}

pub type RespiteResult<T> = Result<T, RespiteError>;
