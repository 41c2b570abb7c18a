use crate::infrastructure::media::MediaEngine;
use peerlink_runtime::ThreadHandle;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Identifier of a media channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(u32);

impl ChannelId {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch-{}", self.0)
    }
}

/// Manages media channels on behalf of connection instances
///
/// Owns the media engine. Channel work runs on the worker and network
/// threads captured at construction; the accessor surface is affine to the
/// signaling thread.
pub struct ChannelManager {
    media_engine: Box<dyn MediaEngine>,
    worker_thread: ThreadHandle,
    network_thread: ThreadHandle,
    next_channel: AtomicU32,
    open_channels: Mutex<Vec<ChannelId>>,
}

impl ChannelManager {
    pub fn new(
        media_engine: Box<dyn MediaEngine>,
        worker_thread: ThreadHandle,
        network_thread: ThreadHandle,
    ) -> Self {
        tracing::debug!(
            "Channel manager created (worker: '{}', network: '{}')",
            worker_thread.name(),
            network_thread.name()
        );

        Self {
            media_engine,
            worker_thread,
            network_thread,
            next_channel: AtomicU32::new(0),
            open_channels: Mutex::new(Vec::new()),
        }
    }

    pub fn media_engine(&self) -> &dyn MediaEngine {
        self.media_engine.as_ref()
    }

    pub fn worker_thread(&self) -> &ThreadHandle {
        &self.worker_thread
    }

    pub fn network_thread(&self) -> &ThreadHandle {
        &self.network_thread
    }

    /// Allocate a channel id for a new media channel
    pub fn create_channel(&self) -> ChannelId {
        let id = ChannelId(self.next_channel.fetch_add(1, Ordering::Relaxed));
        self.open_channels.lock().unwrap().push(id);

        tracing::debug!("Created channel {}", id);
        id
    }

    /// Release a channel id; unknown ids are ignored
    pub fn destroy_channel(&self, id: ChannelId) {
        let mut open = self.open_channels.lock().unwrap();
        if let Some(pos) = open.iter().position(|c| *c == id) {
            open.swap_remove(pos);
            tracing::debug!("Destroyed channel {}", id);
        }
    }

    pub fn channel_count(&self) -> usize {
        self.open_channels.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::media::DefaultMediaEngine;

    fn manager() -> (ChannelManager, ThreadHandle, ThreadHandle) {
        let worker = ThreadHandle::spawn("cm_worker").unwrap();
        let network = ThreadHandle::spawn("cm_network").unwrap();
        let mut engine = DefaultMediaEngine::new();
        engine.init().unwrap();

        (
            ChannelManager::new(Box::new(engine), worker.clone(), network.clone()),
            worker,
            network,
        )
    }

    #[test]
    fn test_channel_ids_are_unique() {
        let (manager, worker, network) = manager();

        let a = manager.create_channel();
        let b = manager.create_channel();

        assert_ne!(a, b);
        assert_eq!(manager.channel_count(), 2);

        drop(manager);
        worker.stop();
        network.stop();
    }

    #[test]
    fn test_destroy_releases_channel() {
        let (manager, worker, network) = manager();

        let id = manager.create_channel();
        manager.destroy_channel(id);
        assert_eq!(manager.channel_count(), 0);

        // Destroying again is harmless
        manager.destroy_channel(id);
        assert_eq!(manager.channel_count(), 0);

        drop(manager);
        worker.stop();
        network.stop();
    }

    #[test]
    fn test_exposes_media_engine() {
        let (manager, worker, network) = manager();

        assert!(!manager.media_engine().audio_codecs().is_empty());

        drop(manager);
        worker.stop();
        network.stop();
    }
}
