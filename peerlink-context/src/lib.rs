// Domain layer (core types)
pub mod domain;

// The context object and its dependency bundle
pub mod context;
pub mod dependencies;

// Infrastructure layer (subsystem factories)
pub mod infrastructure;

// Re-exports for convenience
pub use context::ConnectionContext;
pub use dependencies::ContextDependencies;
pub use domain::{
    ContextId, ContextOptions, NetworkToken, SignalingToken, Trials, WorkerToken,
};
pub use infrastructure::error::{ContextError, Result};
pub use infrastructure::{
    AdapterKind, AudioCodec, BasicNetworkManager, BasicPacketSocketFactory, Call, CallConfig,
    CallFactory, ChannelId, ChannelManager, DefaultCallFactory, DefaultMediaEngine,
    DefaultStreamTransportFactory, MediaEngine, NetworkInfo, NetworkManager, NetworkMonitor,
    NetworkMonitorFactory, PacketSocketFactory, StreamTransport, StreamTransportFactory,
};
