use peerlink_runtime::RuntimeError;

/// Context construction and subsystem errors
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("Worker and network thread must be distinct execution contexts")]
    SharedWorkerAndNetworkThread,

    #[error("Media engine initialization failed: {0}")]
    MediaEngineInit(String),

    #[error("Invalid context ID: {0}")]
    InvalidContextId(String),
}

pub type Result<T> = std::result::Result<T, ContextError>;
