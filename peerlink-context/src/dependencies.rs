use crate::domain::{ContextOptions, Trials};
use crate::infrastructure::{
    CallFactory, MediaEngine, NetworkManager, NetworkMonitorFactory, PacketSocketFactory,
    StreamTransportFactory,
};
use peerlink_runtime::ThreadHandle;

/// Dependency bundle consumed by [`ConnectionContext::create`]
///
/// Every field is optional; anything left unset is defaulted during
/// creation. The signaling thread is implicit: it is the thread that calls
/// `create`. A supplied worker or network handle is borrowed, never stopped
/// by the context; an injected factory must already be affine to its
/// declared thread.
///
/// [`ConnectionContext::create`]: crate::ConnectionContext::create
#[derive(Default)]
pub struct ContextDependencies {
    pub(crate) worker_thread: Option<ThreadHandle>,
    pub(crate) network_thread: Option<ThreadHandle>,
    pub(crate) network_manager: Option<Box<dyn NetworkManager>>,
    pub(crate) socket_factory: Option<Box<dyn PacketSocketFactory>>,
    pub(crate) media_engine: Option<Box<dyn MediaEngine>>,
    pub(crate) call_factory: Option<Box<dyn CallFactory>>,
    pub(crate) transport_factory: Option<Box<dyn StreamTransportFactory>>,
    pub(crate) network_monitor_factory: Option<Box<dyn NetworkMonitorFactory>>,
    pub(crate) options: Option<ContextOptions>,
    pub(crate) trials: Option<Trials>,
}

impl ContextDependencies {
    /// Create an empty bundle (everything defaulted)
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an already-running thread as the worker thread (borrowed)
    pub fn worker_thread(mut self, handle: ThreadHandle) -> Self {
        self.worker_thread = Some(handle);
        self
    }

    /// Use an already-running thread as the network thread (borrowed)
    pub fn network_thread(mut self, handle: ThreadHandle) -> Self {
        self.network_thread = Some(handle);
        self
    }

    /// Inject a network manager (must be affine to the signaling thread)
    pub fn network_manager(mut self, manager: Box<dyn NetworkManager>) -> Self {
        self.network_manager = Some(manager);
        self
    }

    /// Inject a packet socket factory
    pub fn socket_factory(mut self, factory: Box<dyn PacketSocketFactory>) -> Self {
        self.socket_factory = Some(factory);
        self
    }

    /// Inject a media engine (initialized during creation)
    pub fn media_engine(mut self, engine: Box<dyn MediaEngine>) -> Self {
        self.media_engine = Some(engine);
        self
    }

    /// Inject a call factory (must be affine to the worker thread)
    pub fn call_factory(mut self, factory: Box<dyn CallFactory>) -> Self {
        self.call_factory = Some(factory);
        self
    }

    /// Inject a stream-transport factory
    pub fn transport_factory(mut self, factory: Box<dyn StreamTransportFactory>) -> Self {
        self.transport_factory = Some(factory);
        self
    }

    /// Inject a platform network-monitor factory for the default manager
    pub fn network_monitor_factory(mut self, factory: Box<dyn NetworkMonitorFactory>) -> Self {
        self.network_monitor_factory = Some(factory);
        self
    }

    /// Set the initial options record
    pub fn options(mut self, options: ContextOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Capture a feature-trials snapshot
    pub fn trials(mut self, trials: Trials) -> Self {
        self.trials = Some(trials);
        self
    }
}
