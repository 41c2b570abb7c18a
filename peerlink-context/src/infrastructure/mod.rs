pub mod call;
pub mod channel;
pub mod error;
pub mod media;
pub mod network;
pub mod sockets;
pub mod transport;

pub use call::{Call, CallConfig, CallFactory, DefaultCallFactory};
pub use channel::{ChannelId, ChannelManager};
pub use media::{AudioCodec, DefaultMediaEngine, MediaEngine};
pub use network::{
    AdapterKind, BasicNetworkManager, NetworkInfo, NetworkManager, NetworkMonitor,
    NetworkMonitorFactory,
};
pub use sockets::{BasicPacketSocketFactory, PacketSocketFactory};
pub use transport::{DefaultStreamTransportFactory, StreamTransport, StreamTransportFactory};
