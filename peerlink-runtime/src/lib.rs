// Execution threads
pub mod handle;

// Owned vs borrowed thread wrapper
pub mod binding;

pub mod error;

pub use binding::ThreadBinding;
pub use error::{Result, RuntimeError};
pub use handle::ThreadHandle;
