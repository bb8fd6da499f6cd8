//! Reference window location.
//!
//! The calibration target sits at a known reference distance; its echo is
//! expected within a +/- 1 m window around that distance. This module maps
//! the window from meters onto range-FFT bin indices using the radar timing
//! parameters.

use crate::errors::ConfigError;

/// Speed of light in m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Half-open range-bin interval [lo, hi) expected to contain the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceWindow {
    pub lo: usize,
    pub hi: usize,
}

impl ReferenceWindow {
    pub fn len(&self) -> usize {
        self.hi - self.lo
    }

    pub fn is_empty(&self) -> bool {
        self.lo == self.hi
    }
}

/// Locate the range-bin window around the reference distance.
///
/// * `frequency_slope` - chirp slope in Hz/s
/// * `sampling_frequency` - ADC sampling frequency in Hz
/// * `nsample` - number of range bins (samples per chirp)
/// * `reference` - distance of the calibration target in m
///
/// A window that collapses to empty or leaves `[0, nsample]` (reference too
/// close to zero, or beyond the maximum unambiguous range) is a
/// [`ConfigError`]. No clamping is performed: callers expecting a silently
/// clamped window must clamp the reference distance themselves.
pub fn reference_window(
    frequency_slope: f64,
    sampling_frequency: f64,
    nsample: usize,
    reference: f64,
) -> Result<ReferenceWindow, ConfigError> {
    // Max unambiguous range and range resolution of the waveform
    let max_range = sampling_frequency * SPEED_OF_LIGHT / (2.0 * frequency_slope);
    let resolution = max_range / nsample as f64;

    let lo = ((reference - 1.0) / resolution).floor();
    let hi = ((reference + 1.0) / resolution).floor();

    if lo < 0.0 || lo >= hi || hi > nsample as f64 {
        return Err(ConfigError::InvalidWindow {
            lo: lo as i64,
            hi: hi as i64,
            nsample,
        });
    }

    let window = ReferenceWindow {
        lo: lo as usize,
        hi: hi as usize,
    };
    log::debug!(
        "Reference window for {} m target: bins [{}, {}) at {:.4} m resolution",
        reference,
        window.lo,
        window.hi,
        resolution
    );
    Ok(window)
}
