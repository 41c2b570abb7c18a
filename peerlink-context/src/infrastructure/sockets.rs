use std::net::{SocketAddr, UdpSocket};

/// Creates packet sockets for connection instances
///
/// Affine to the signaling thread; the sockets themselves are handed off to
/// whichever thread drives their I/O.
pub trait PacketSocketFactory: Send + Sync {
    /// Bind a UDP socket on the given local address
    fn create_udp_socket(&self, bind_addr: SocketAddr) -> std::io::Result<UdpSocket>;
}

/// Default socket factory binding plain UDP sockets
#[derive(Debug, Default)]
pub struct BasicPacketSocketFactory;

impl BasicPacketSocketFactory {
    pub fn new() -> Self {
        Self
    }
}

impl PacketSocketFactory for BasicPacketSocketFactory {
    fn create_udp_socket(&self, bind_addr: SocketAddr) -> std::io::Result<UdpSocket> {
        let socket = UdpSocket::bind(bind_addr)?;
        tracing::debug!("Bound UDP socket on {}", socket.local_addr()?);
        Ok(socket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binds_ephemeral_udp_socket() {
        let factory = BasicPacketSocketFactory::new();
        let socket = factory
            .create_udp_socket("127.0.0.1:0".parse().unwrap())
            .unwrap();

        assert_ne!(socket.local_addr().unwrap().port(), 0);
    }

    #[test]
    fn test_bind_failure_surfaces_io_error() {
        let factory = BasicPacketSocketFactory::new();
        let first = factory
            .create_udp_socket("127.0.0.1:0".parse().unwrap())
            .unwrap();

        // Second bind on the same concrete port fails
        let taken = first.local_addr().unwrap();
        assert!(factory.create_udp_socket(taken).is_err());
    }
}
