use std::sync::atomic::{AtomicU64, Ordering};

/// Parameters for a new call
#[derive(Debug, Clone, Default)]
pub struct CallConfig {
    pub audio: bool,
    pub video: bool,
}

/// Handle to an orchestrated call
#[derive(Debug)]
pub struct Call {
    id: u64,
    config: CallConfig,
}

impl Call {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn config(&self) -> &CallConfig {
        &self.config
    }
}

/// Creates calls; affine to the worker thread
///
/// The default implementation is constructed on the worker thread during
/// context creation. An injected implementation must already be affine to
/// the worker thread; the context adds no synchronization around it.
pub trait CallFactory: Send + Sync {
    fn create_call(&self, config: CallConfig) -> Call;
}

/// Default call factory
pub struct DefaultCallFactory {
    next_id: AtomicU64,
}

impl DefaultCallFactory {
    pub fn new() -> Self {
        tracing::debug!(
            "Call factory created on '{}'",
            std::thread::current().name().unwrap_or("<unnamed>")
        );

        Self {
            next_id: AtomicU64::new(0),
        }
    }
}

impl Default for DefaultCallFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CallFactory for DefaultCallFactory {
    fn create_call(&self, config: CallConfig) -> Call {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Created call {}", id);

        Call { id, config }
    }
}
