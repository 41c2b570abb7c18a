use std::net::{IpAddr, Ipv4Addr};
use std::sync::Mutex;

/// Kind of network adapter a discovered network sits behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    Ethernet,
    Wifi,
    Cellular,
    Loopback,
    Virtual,
}

impl AdapterKind {
    /// Bit used by the ignore mask in the context options
    pub fn mask_bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// A network reachable from this host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub name: String,
    pub ip: IpAddr,
    pub kind: AdapterKind,
}

/// Platform monitor reporting connectivity changes
pub trait NetworkMonitor: Send + Sync {
    fn start(&self);
    fn stop(&self);
}

/// Creates platform network monitors for the default network manager
pub trait NetworkMonitorFactory: Send + Sync {
    fn create_monitor(&self) -> Box<dyn NetworkMonitor>;
}

/// Network discovery, affine to the signaling thread
pub trait NetworkManager: Send + Sync {
    /// Begin watching for network changes
    fn start_updates(&self);

    /// Stop watching for network changes
    fn stop_updates(&self);

    /// Currently known networks, ignore mask already applied
    fn networks(&self) -> Vec<NetworkInfo>;
}

/// Default network manager
///
/// Knows the loopback network out of the box; a platform monitor (created
/// through the injected factory on the first `start_updates`) may push
/// further networks via [`BasicNetworkManager::set_networks`].
pub struct BasicNetworkManager {
    monitor_factory: Option<Box<dyn NetworkMonitorFactory>>,
    monitor: Mutex<Option<Box<dyn NetworkMonitor>>>,
    networks: Mutex<Vec<NetworkInfo>>,
    ignore_mask: u32,
}

impl BasicNetworkManager {
    pub fn new(monitor_factory: Option<Box<dyn NetworkMonitorFactory>>, ignore_mask: u32) -> Self {
        Self {
            monitor_factory,
            monitor: Mutex::new(None),
            networks: Mutex::new(vec![NetworkInfo {
                name: "lo".to_string(),
                ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
                kind: AdapterKind::Loopback,
            }]),
            ignore_mask,
        }
    }

    /// Replace the known network list (called by monitors and tests)
    pub fn set_networks(&self, networks: Vec<NetworkInfo>) {
        *self.networks.lock().unwrap() = networks;
    }

    pub fn ignore_mask(&self) -> u32 {
        self.ignore_mask
    }
}

impl NetworkManager for BasicNetworkManager {
    fn start_updates(&self) {
        let mut monitor = self.monitor.lock().unwrap();
        if monitor.is_some() {
            return;
        }

        if let Some(factory) = &self.monitor_factory {
            let created = factory.create_monitor();
            created.start();
            *monitor = Some(created);
            tracing::debug!("Network monitor started");
        } else {
            tracing::debug!("Network updates started without a platform monitor");
        }
    }

    fn stop_updates(&self) {
        if let Some(monitor) = self.monitor.lock().unwrap().take() {
            monitor.stop();
            tracing::debug!("Network monitor stopped");
        }
    }

    fn networks(&self) -> Vec<NetworkInfo> {
        self.networks
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.kind.mask_bit() & self.ignore_mask == 0)
            .cloned()
            .collect()
    }
}
