use legis_analysis::{ExtractError, RefineError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("path {0} is outside the document root")]
    OutsideRoot(String),

    #[error("cannot resolve {path}: {source}")]
    Path {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Refine(#[from] RefineError),

    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
