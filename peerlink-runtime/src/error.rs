/// Execution thread errors
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("Thread spawn failed: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
