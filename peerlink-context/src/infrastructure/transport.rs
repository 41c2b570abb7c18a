use peerlink_runtime::ThreadHandle;

/// A reliable stream transport between two peers
#[derive(Debug)]
pub struct StreamTransport {
    label: String,
}

impl StreamTransport {
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Creates stream transports
///
/// The accessor surface is affine to the signaling thread; the transports
/// themselves run on the network thread the factory was created with.
pub trait StreamTransportFactory: Send + Sync {
    fn create_transport(&self, label: &str) -> StreamTransport;
}

/// Default stream-transport factory
pub struct DefaultStreamTransportFactory {
    network_thread: ThreadHandle,
}

impl DefaultStreamTransportFactory {
    pub fn new(network_thread: ThreadHandle) -> Self {
        Self { network_thread }
    }

    pub fn network_thread(&self) -> &ThreadHandle {
        &self.network_thread
    }
}

impl StreamTransportFactory for DefaultStreamTransportFactory {
    fn create_transport(&self, label: &str) -> StreamTransport {
        tracing::debug!(
            "Creating stream transport '{}' on '{}'",
            label,
            self.network_thread.name()
        );

        StreamTransport {
            label: label.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_carries_label() {
        let network = ThreadHandle::spawn("tf_network").unwrap();
        let factory = DefaultStreamTransportFactory::new(network.clone());

        let transport = factory.create_transport("data");
        assert_eq!(transport.label(), "data");
        assert!(factory.network_thread().same_thread(&network));

        drop(factory);
        network.stop();
    }
}
