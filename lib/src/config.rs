//! Calibration configuration as supplied by the radar recording tooling.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::frame::FrameDims;

/// Waveform parameters of the recording used for calibration.
///
/// The JSON field names follow the recording tool's convention; the struct
/// exposes SI-unit accessors so the pipeline never handles mixed units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Number of transmission antennas
    pub ntx: usize,
    /// Number of reception antennas
    pub nrx: usize,
    /// Number of chirp loops per frame
    #[serde(rename = "numChirpLoops")]
    pub num_chirp_loops: usize,
    /// Number of ADC samples per chirp
    #[serde(rename = "numAdcSamples")]
    pub num_adc_samples: usize,
    /// Chirp frequency slope in MHz/us
    #[serde(rename = "frequencySlope_Mhz_us")]
    pub frequency_slope_mhz_us: f64,
    /// ADC sampling frequency in ksps
    #[serde(rename = "adcSamplingFrequency_ksps")]
    pub adc_sampling_frequency_ksps: f64,
}

impl CalibrationConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        log::trace!(
            "Loading calibration configuration from {}",
            path.as_ref().display()
        );
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for physically meaningless values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("ntx", self.ntx),
            ("nrx", self.nrx),
            ("numChirpLoops", self.num_chirp_loops),
            ("numAdcSamples", self.num_adc_samples),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDimension { field });
            }
        }
        if self.frequency_slope_mhz_us <= 0.0 {
            return Err(ConfigError::NonPositiveParameter {
                field: "frequencySlope_Mhz_us",
                value: self.frequency_slope_mhz_us,
            });
        }
        if self.adc_sampling_frequency_ksps <= 0.0 {
            return Err(ConfigError::NonPositiveParameter {
                field: "adcSamplingFrequency_ksps",
                value: self.adc_sampling_frequency_ksps,
            });
        }
        Ok(())
    }

    /// Frame dimensions declared by this configuration.
    pub fn dims(&self) -> FrameDims {
        FrameDims {
            ntx: self.ntx,
            nrx: self.nrx,
            nchirp: self.num_chirp_loops,
            nsample: self.num_adc_samples,
        }
    }

    /// Chirp frequency slope in Hz/s.
    pub fn frequency_slope(&self) -> f64 {
        self.frequency_slope_mhz_us * 1e12
    }

    /// ADC sampling frequency in Hz.
    pub fn sampling_frequency(&self) -> f64 {
        self.adc_sampling_frequency_ksps * 1e3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_JSON: &str = r#"{
        "ntx": 12,
        "nrx": 16,
        "numChirpLoops": 16,
        "numAdcSamples": 256,
        "frequencySlope_Mhz_us": 50.0,
        "adcSamplingFrequency_ksps": 10000.0
    }"#;

    #[test]
    fn test_parses_recording_tool_field_names() {
        let config: CalibrationConfig = serde_json::from_str(CONFIG_JSON).unwrap();
        assert_eq!(config.ntx, 12);
        assert_eq!(config.nrx, 16);
        assert_eq!(config.num_chirp_loops, 16);
        assert_eq!(config.num_adc_samples, 256);
        assert_eq!(
            config.dims(),
            FrameDims {
                ntx: 12,
                nrx: 16,
                nchirp: 16,
                nsample: 256
            }
        );
    }

    #[test]
    fn test_unit_conversions() {
        let config: CalibrationConfig = serde_json::from_str(CONFIG_JSON).unwrap();
        // 50 MHz/us = 5e13 Hz/s, 10000 ksps = 1e7 Hz
        assert_eq!(config.frequency_slope(), 5e13);
        assert_eq!(config.sampling_frequency(), 1e7);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let mut config: CalibrationConfig = serde_json::from_str(CONFIG_JSON).unwrap();
        config.nrx = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroDimension { field: "nrx" })
        ));
    }

    #[test]
    fn test_rejects_non_positive_slope() {
        let mut config: CalibrationConfig = serde_json::from_str(CONFIG_JSON).unwrap();
        config.frequency_slope_mhz_us = -50.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveParameter {
                field: "frequencySlope_Mhz_us",
                ..
            })
        ));
    }
}
