use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Options shared by every connection instance created through a context
///
/// Captured at construction and mutable afterwards only while running on the
/// signaling thread (every mutation path requires a
/// [`SignalingToken`](crate::SignalingToken)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContextOptions {
    /// Skip encryption on media transports (interop testing only)
    pub disable_encryption: bool,

    /// Do not start a platform network monitor even if a factory was supplied
    pub disable_network_monitor: bool,

    /// Bitmask of adapter kinds hidden from network discovery
    pub network_ignore_mask: u32,

    /// Upper bound on concurrently orchestrated calls, unlimited if unset
    pub max_call_count: Option<u32>,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            disable_encryption: false,
            disable_network_monitor: false,
            network_ignore_mask: 0,
            max_call_count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ContextOptions::default();

        assert!(!options.disable_encryption);
        assert!(!options.disable_network_monitor);
        assert_eq!(options.network_ignore_mask, 0);
        assert!(options.max_call_count.is_none());
    }

    #[test]
    fn test_options_serialization() {
        let options = ContextOptions {
            disable_encryption: true,
            network_ignore_mask: 0b100,
            ..Default::default()
        };

        let json = serde_json::to_string(&options).unwrap();
        let deserialized: ContextOptions = serde_json::from_str(&json).unwrap();

        assert_eq!(options, deserialized);
    }
}
