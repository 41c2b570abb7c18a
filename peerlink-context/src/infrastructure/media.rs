use crate::infrastructure::error::{ContextError, Result};

/// An audio codec advertised by the media engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCodec {
    pub name: String,
    pub clock_rate: u32,
    pub channels: u8,
}

impl AudioCodec {
    pub fn new(name: &str, clock_rate: u32, channels: u8) -> Self {
        Self {
            name: name.to_string(),
            clock_rate,
            channels,
        }
    }
}

/// Media engine brought up once during context creation
///
/// `init` runs on the signaling thread; afterwards the engine is owned by
/// the channel manager and read through its accessor surface.
pub trait MediaEngine: Send + Sync {
    /// One-time platform bring-up; failure is fatal to context creation
    fn init(&mut self) -> Result<()>;

    /// Codecs available for channel negotiation
    fn audio_codecs(&self) -> Vec<AudioCodec>;
}

/// Built-in software media engine
pub struct DefaultMediaEngine {
    initialized: bool,
    codecs: Vec<AudioCodec>,
}

impl DefaultMediaEngine {
    pub fn new() -> Self {
        Self {
            initialized: false,
            codecs: vec![
                AudioCodec::new("opus", 48_000, 2),
                AudioCodec::new("PCMU", 8_000, 1),
                AudioCodec::new("PCMA", 8_000, 1),
            ],
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Default for DefaultMediaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaEngine for DefaultMediaEngine {
    fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Err(ContextError::MediaEngineInit(
                "engine already initialized".to_string(),
            ));
        }

        self.initialized = true;
        tracing::debug!("Media engine ready with {} audio codecs", self.codecs.len());
        Ok(())
    }

    fn audio_codecs(&self) -> Vec<AudioCodec> {
        self.codecs.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_marks_engine_ready() {
        let mut engine = DefaultMediaEngine::new();
        assert!(!engine.is_initialized());

        engine.init().unwrap();
        assert!(engine.is_initialized());
    }

    #[test]
    fn test_double_init_fails() {
        let mut engine = DefaultMediaEngine::new();
        engine.init().unwrap();

        assert!(engine.init().is_err());
    }

    #[test]
    fn test_advertises_opus() {
        let engine = DefaultMediaEngine::new();

        assert!(engine.audio_codecs().iter().any(|c| c.name == "opus"));
    }
}
