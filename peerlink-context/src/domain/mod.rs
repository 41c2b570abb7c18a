pub mod id;
pub mod options;
pub mod token;
pub mod trials;

pub use id::ContextId;
pub use options::ContextOptions;
pub use token::{NetworkToken, SignalingToken, WorkerToken};
pub use trials::Trials;
