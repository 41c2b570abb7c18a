use std::fmt;
use std::sync::{Arc, Mutex};

use peerlink_runtime::{ThreadBinding, ThreadHandle};

use crate::dependencies::ContextDependencies;
use crate::domain::{ContextId, ContextOptions, NetworkToken, SignalingToken, Trials, WorkerToken};
use crate::infrastructure::error::{ContextError, Result};
use crate::infrastructure::{
    BasicNetworkManager, BasicPacketSocketFactory, CallFactory, ChannelManager,
    DefaultCallFactory, DefaultMediaEngine, DefaultStreamTransportFactory, MediaEngine,
    NetworkManager, PacketSocketFactory, StreamTransportFactory,
};

const SIGNALING_THREAD_NAME: &str = "peerlink_signaling";
const WORKER_THREAD_NAME: &str = "peerlink_worker";
const NETWORK_THREAD_NAME: &str = "peerlink_network";

/// Shared execution context for a family of connection instances
///
/// Owns the worker and network threads (unless borrowed), the subsystem
/// factories, the options record and the feature-trials snapshot. Every
/// connection instance holds an `Arc` to the context for its own lifetime;
/// the context is torn down when the last reference is released, on the
/// signaling thread.
///
/// Thread-affine state is reachable only through accessors that demand the
/// matching thread token ([`SignalingToken`], [`WorkerToken`],
/// [`NetworkToken`]), so a wrong-thread read fails to compile rather than
/// racing at runtime.
pub struct ConnectionContext {
    id: ContextId,

    options: Mutex<ContextOptions>,
    trials: Trials,

    // Subsystems are declared before the thread bindings: field drop order
    // releases every factory while its owning thread still runs.
    default_network_manager: Box<dyn NetworkManager>,
    default_socket_factory: Box<dyn PacketSocketFactory>,
    channel_manager: ChannelManager,
    // Taken in Drop so the release can run on the worker thread
    call_factory: Option<Box<dyn CallFactory>>,
    transport_factory: Box<dyn StreamTransportFactory>,

    signaling_thread: ThreadBinding,
    worker_thread: ThreadBinding,
    network_thread: ThreadBinding,
}

impl ConnectionContext {
    /// Build a fully-initialized context from a dependency bundle
    ///
    /// Runs synchronously on the calling thread, which becomes the context's
    /// signaling thread for its entire life. Subsystems are constructed in
    /// dependency order, each on its owning thread; the call factory is
    /// built on the worker thread via a blocking invocation. Any failure
    /// aborts creation — the caller may build a fresh context but there is
    /// no partial retry.
    pub fn create(deps: ContextDependencies) -> Result<Arc<Self>> {
        let ContextDependencies {
            worker_thread,
            network_thread,
            network_manager,
            socket_factory,
            media_engine,
            call_factory,
            transport_factory,
            network_monitor_factory,
            options,
            trials,
        } = deps;

        let id = ContextId::new();
        let options = options.unwrap_or_default();
        let trials = trials.unwrap_or_default();

        let signaling_thread =
            ThreadBinding::Borrowed(ThreadHandle::wrap_current(SIGNALING_THREAD_NAME));

        let worker_thread = match worker_thread {
            Some(handle) => ThreadBinding::Borrowed(handle),
            None => ThreadBinding::Owned(ThreadHandle::spawn(WORKER_THREAD_NAME)?),
        };
        let network_thread = match network_thread {
            Some(handle) => ThreadBinding::Borrowed(handle),
            None => ThreadBinding::Owned(ThreadHandle::spawn(NETWORK_THREAD_NAME)?),
        };

        // Network-affine and worker-affine state must not share one task
        // loop; the original design leaves this case undefined.
        if worker_thread.handle().same_thread(network_thread.handle()) {
            return Err(ContextError::SharedWorkerAndNetworkThread);
        }

        tracing::info!(
            "Creating connection context {} (worker '{}' {}, network '{}' {})",
            id,
            worker_thread.handle().name(),
            if worker_thread.is_owned() { "owned" } else { "borrowed" },
            network_thread.handle().name(),
            if network_thread.is_owned() { "owned" } else { "borrowed" },
        );

        // Signaling-affine subsystems first.
        let monitor_factory = if options.disable_network_monitor {
            None
        } else {
            network_monitor_factory
        };
        let default_network_manager: Box<dyn NetworkManager> = match network_manager {
            Some(manager) => manager,
            None => Box::new(BasicNetworkManager::new(
                monitor_factory,
                options.network_ignore_mask,
            )),
        };

        let default_socket_factory: Box<dyn PacketSocketFactory> =
            socket_factory.unwrap_or_else(|| Box::new(BasicPacketSocketFactory::new()));

        let mut media_engine: Box<dyn MediaEngine> =
            media_engine.unwrap_or_else(|| Box::new(DefaultMediaEngine::new()));
        media_engine.init()?;

        let channel_manager = ChannelManager::new(
            media_engine,
            worker_thread.handle().clone(),
            network_thread.handle().clone(),
        );

        // Call orchestration is worker-affine; block until the worker thread
        // has constructed the factory.
        let call_factory: Box<dyn CallFactory> = match call_factory {
            Some(factory) => factory,
            None => worker_thread
                .handle()
                .invoke(|| Box::new(DefaultCallFactory::new()) as Box<dyn CallFactory>),
        };

        let transport_factory: Box<dyn StreamTransportFactory> = match transport_factory {
            Some(factory) => factory,
            None => Box::new(DefaultStreamTransportFactory::new(
                network_thread.handle().clone(),
            )),
        };

        tracing::info!("Connection context {} ready", id);

        Ok(Arc::new(Self {
            id,
            options: Mutex::new(options),
            trials,
            default_network_manager,
            default_socket_factory,
            channel_manager,
            call_factory: Some(call_factory),
            transport_factory,
            signaling_thread,
            worker_thread,
            network_thread,
        }))
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    // ===== Thread handles (safe from any thread) =====

    pub fn signaling_thread(&self) -> &ThreadHandle {
        self.signaling_thread.handle()
    }

    pub fn worker_thread(&self) -> &ThreadHandle {
        self.worker_thread.handle()
    }

    pub fn network_thread(&self) -> &ThreadHandle {
        self.network_thread.handle()
    }

    /// Feature-trials snapshot; immutable, readable from any thread
    pub fn trials(&self) -> &Trials {
        &self.trials
    }

    // ===== Token minting =====

    /// Prove the caller runs on the signaling thread
    ///
    /// # Panics
    ///
    /// Calling this from any other thread is a programming error and panics.
    pub fn signaling_token(&self) -> SignalingToken {
        self.assert_on(self.signaling_thread.handle(), "signaling");
        SignalingToken::mint()
    }

    /// Prove the caller runs on the worker thread
    ///
    /// # Panics
    ///
    /// Calling this from any other thread is a programming error and panics.
    pub fn worker_token(&self) -> WorkerToken {
        self.assert_on(self.worker_thread.handle(), "worker");
        WorkerToken::mint()
    }

    /// Prove the caller runs on the network thread
    ///
    /// # Panics
    ///
    /// Calling this from any other thread is a programming error and panics.
    pub fn network_token(&self) -> NetworkToken {
        self.assert_on(self.network_thread.handle(), "network");
        NetworkToken::mint()
    }

    // ===== Gated subsystem accessors =====

    pub fn channel_manager(&self, _proof: &SignalingToken) -> &ChannelManager {
        &self.channel_manager
    }

    pub fn default_network_manager(&self, _proof: &SignalingToken) -> &dyn NetworkManager {
        self.default_network_manager.as_ref()
    }

    pub fn default_socket_factory(&self, _proof: &SignalingToken) -> &dyn PacketSocketFactory {
        self.default_socket_factory.as_ref()
    }

    pub fn transport_factory(&self, _proof: &SignalingToken) -> &dyn StreamTransportFactory {
        self.transport_factory.as_ref()
    }

    pub fn call_factory(&self, _proof: &WorkerToken) -> &dyn CallFactory {
        self.call_factory
            .as_deref()
            .expect("call factory is released only at teardown")
    }

    /// Current options record
    pub fn options(&self, _proof: &SignalingToken) -> ContextOptions {
        self.options.lock().unwrap().clone()
    }

    /// Replace the options record
    pub fn set_options(&self, _proof: &SignalingToken, options: ContextOptions) {
        *self.options.lock().unwrap() = options;
    }

    fn assert_on(&self, handle: &ThreadHandle, role: &str) {
        if !handle.is_current() {
            panic!(
                "context {}: {} token requested from thread '{}', but the {} thread is '{}'",
                self.id,
                role,
                std::thread::current().name().unwrap_or("<unnamed>"),
                role,
                handle.name(),
            );
        }
    }
}

impl Drop for ConnectionContext {
    fn drop(&mut self) {
        assert!(
            self.signaling_thread.handle().is_current(),
            "context {} dropped on thread '{}'; teardown must run on the signaling thread",
            self.id,
            std::thread::current().name().unwrap_or("<unnamed>"),
        );

        tracing::info!("Tearing down connection context {}", self.id);

        // Worker-affine state is released on the worker thread before the
        // binding below stops it. The remaining subsystems and the owned
        // threads drop in field order on this thread.
        if let Some(call_factory) = self.call_factory.take() {
            self.worker_thread.handle().invoke(move || drop(call_factory));
        }
    }
}

impl fmt::Debug for ConnectionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionContext")
            .field("id", &self.id)
            .field("worker_owned", &self.worker_thread.is_owned())
            .field("network_owned", &self.network_thread.is_owned())
            .field("trials", &self.trials)
            .finish()
    }
}
