use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Immutable feature-trials snapshot
///
/// Copied once at context construction; there is no later mutation path, so
/// it is readable from any thread without an affinity token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Trials {
    entries: HashMap<String, String>,
}

impl Trials {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Build a snapshot from key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value recorded for a trial key, if any
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether a trial is switched on ("Enabled" value convention)
    pub fn is_enabled(&self, key: &str) -> bool {
        self.lookup(key) == Some("Enabled")
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
