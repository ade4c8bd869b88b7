use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::wav;

/// Keeps the WAV byte rate (rate * block align) inside its 32-bit field.
pub const MAX_SAMPLE_RATE: u32 = u32::MAX / wav::BLOCK_ALIGN as u32;

/// What `assemble` hands back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// S-record text
    #[default]
    Srec,
    /// Line-numbered listing
    Listing,
    /// Two-channel 16-bit PCM WAV for the audio bootloader
    Audio,
    /// Raw ternary samples for a step-driven (blinking) transport
    Signal,
}

/// Modulation parameters for the bootloader transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub sample_rate: u32,
    /// Low edges sent before the start pulse of every frame
    pub sync_edges: usize,
    /// Zero samples between frames (441 = 10 ms at 44.1 kHz)
    pub silence_samples: usize,
    /// PCM value for a +1 sample
    pub amplitude: i16,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            sync_edges: 40,
            silence_samples: 441,
            amplitude: 32_767,
        }
    }
}

impl TransportConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SAMPLE_RATE).contains(&self.sample_rate) {
            return Err(ConfigError::SampleRate(self.sample_rate));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssembleOptions {
    pub mode: OutputMode,
    pub transport: TransportConfig,
}

impl AssembleOptions {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = TransportConfig::from_json(r#"{ "silence_samples": 882 }"#).unwrap();
        assert_eq!(cfg.silence_samples, 882);
        assert_eq!(cfg.sync_edges, 40);
        assert_eq!(cfg.sample_rate, 44_100);
    }

    #[test]
    fn sample_rate_is_bounded() {
        let err = TransportConfig::from_json(r#"{ "sample_rate": 2000000000 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::SampleRate(2_000_000_000)));
        assert!(matches!(
            TransportConfig::from_json(r#"{ "sample_rate": 0 }"#),
            Err(ConfigError::SampleRate(0))
        ));
        assert!(TransportConfig::from_json(&format!(r#"{{ "sample_rate": {MAX_SAMPLE_RATE} }}"#)).is_ok());
        assert!(matches!(TransportConfig::from_json("{ nope"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn mode_names() {
        let opts: AssembleOptions = serde_json::from_str(r#"{ "mode": "listing" }"#).unwrap();
        assert_eq!(opts.mode, OutputMode::Listing);
        assert_eq!(AssembleOptions::default().mode, OutputMode::Srec);
    }
}
