//! Coupling calibration.
//!
//! With no target in reach of the sensor, the residual signal is dominated by
//! direct antenna-to-antenna leakage. That leakage is estimated as the mean
//! of the raw I and Q samples over the chirp and sample axes, yielding one
//! complex coupling value per (tx, rx) pair.

use ndarray::Array2;
use num_complex::Complex64;

use crate::frame::{FrameDims, RawFrame};

/// Estimate the antenna coupling matrix of a no-target frame.
///
/// Returns an (ntx, nrx) matrix where each entry is the mean I + j mean Q of
/// the corresponding antenna pair's samples.
pub fn coupling_calibration(frame: &RawFrame) -> Array2<Complex64> {
    let FrameDims {
        ntx,
        nrx,
        nchirp,
        nsample,
    } = frame.dims();
    let norm = (nchirp * nsample) as f64;

    Array2::from_shape_fn((ntx, nrx), |(tx, rx)| {
        let mut acc = Complex64::new(0.0, 0.0);
        for chirp in 0..nchirp {
            for sample in 0..nsample {
                acc.re += frame.samples[[tx, rx, chirp, sample, 0]] as f64;
                acc.im += frame.samples[[tx, rx, chirp, sample, 1]] as f64;
            }
        }
        acc / norm
    })
}
