//! Waveform calibration.
//!
//! Each antenna pair sees the calibration target with a slightly different
//! phase, amplitude and range bin due to per-chip waveform skew. Relative to
//! the (tx 0, rx 0) reference antenna this module derives:
//!
//!  - a phase/amplitude correction, the complex ratio of the reference peak
//!    to the antenna's peak, and
//!  - a frequency correction, converting the range-bin offset of the peak
//!    into a phase rotation rate.

use std::f64::consts::PI;

use ndarray::{Array2, Array3};
use num_complex::Complex64;

use crate::errors::CalibrationError;
use crate::window::ReferenceWindow;

/// Per-antenna peak locations and values inside the reference window.
#[derive(Debug, Clone)]
pub struct PeakTable {
    /// Absolute range-bin index of each antenna's peak
    pub bins: Array2<usize>,
    /// Complex spectrum value at that bin
    pub values: Array2<Complex64>,
}

/// Derived correction matrices of one waveform calibration run.
#[derive(Debug, Clone)]
pub struct WaveformCalibration {
    /// (ntx, nrx, 2) array of (re, im) of peak(0,0) / peak(tx,rx)
    pub phase_amplitude: Array3<f64>,
    /// (ntx, nrx) phase rotation rate corrections
    pub frequency: Array2<f64>,
}

/// Find each antenna's strongest return within the reference window.
///
/// The returned bin indices are absolute spectrum indices, not relative to
/// the window. Ties resolve to the lowest bin.
///
/// The window must lie within the profile's sample axis; windows produced by
/// [`crate::reference_window`] for the same `nsample` always do.
pub fn locate_peaks(profile: &Array3<Complex64>, window: &ReferenceWindow) -> PeakTable {
    let (ntx, nrx, nsample) = profile.dim();
    debug_assert!(
        window.hi <= nsample,
        "reference window [{}, {}) exceeds profile sample axis of {}",
        window.lo,
        window.hi,
        nsample
    );
    let mut bins = Array2::zeros((ntx, nrx));
    let mut values = Array2::from_elem((ntx, nrx), Complex64::new(0.0, 0.0));

    for tx in 0..ntx {
        for rx in 0..nrx {
            let mut best_bin = window.lo;
            let mut best_mag = f64::NEG_INFINITY;
            for bin in window.lo..window.hi {
                let mag = profile[[tx, rx, bin]].norm_sqr();
                if mag > best_mag {
                    best_mag = mag;
                    best_bin = bin;
                }
            }
            bins[[tx, rx]] = best_bin;
            values[[tx, rx]] = profile[[tx, rx, best_bin]];
        }
    }

    PeakTable { bins, values }
}

/// Derive the phase/amplitude and frequency calibration matrices.
///
/// * `profile` - (ntx, nrx, nsample) range profile of the calibration frame
/// * `window` - range-bin window containing the reference target
/// * `reference` - target distance in m
/// * `sampling_frequency` - ADC sampling frequency in Hz
/// * `frequency_slope` - chirp slope in Hz/s
///
/// Fails with [`CalibrationError`] if any antenna's peak has zero magnitude,
/// which would leave the correction ratio undefined.
pub fn waveform_calibration(
    profile: &Array3<Complex64>,
    window: &ReferenceWindow,
    reference: f64,
    sampling_frequency: f64,
    frequency_slope: f64,
) -> Result<WaveformCalibration, CalibrationError> {
    let (ntx, nrx, _) = profile.dim();
    let peaks = locate_peaks(profile, window);

    for ((tx, rx), value) in peaks.values.indexed_iter() {
        if value.norm_sqr() == 0.0 {
            return Err(CalibrationError::ZeroPeak {
                tx,
                rx,
                bin: peaks.bins[[tx, rx]],
            });
        }
    }

    let reference_peak = peaks.values[[0, 0]];
    let reference_bin = peaks.bins[[0, 0]] as isize;
    log::debug!(
        "Reference antenna peak at bin {} with magnitude {:.1}",
        reference_bin,
        reference_peak.norm()
    );

    let mut phase_amplitude = Array3::zeros((ntx, nrx, 2));
    let mut frequency = Array2::zeros((ntx, nrx));
    for ((tx, rx), &value) in peaks.values.indexed_iter() {
        let ratio = reference_peak / value;
        phase_amplitude[[tx, rx, 0]] = ratio.re;
        phase_amplitude[[tx, rx, 1]] = ratio.im;

        let bin_offset = (peaks.bins[[tx, rx]] as isize - reference_bin) as f64;
        frequency[[tx, rx]] =
            2.0 * PI * bin_offset / reference * (sampling_frequency / frequency_slope);
    }

    Ok(WaveformCalibration {
        phase_amplitude,
        frequency,
    })
}
