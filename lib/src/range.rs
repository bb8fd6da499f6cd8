//! Range profile construction.
//!
//! For each (tx, rx, chirp) the beat signal is transformed into a range
//! spectrum by a length-nsample FFT over the sample axis. The chirp axis is
//! then summed coherently rather than averaged: the chirps share timing, so
//! a real target adds up in amplitude by nchirp while incoherent noise
//! partially cancels.

use ndarray::{s, Array3};
use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::frame::{FrameDims, RawFrame};

/// Compute the per-antenna range profile of a frame.
///
/// Returns an (ntx, nrx, nsample) complex spectrum, the coherent sum of the
/// per-chirp range FFTs.
pub fn range_profile(frame: &RawFrame) -> Array3<Complex64> {
    let FrameDims {
        ntx,
        nrx,
        nchirp,
        nsample,
    } = frame.dims();

    let complex = frame.to_complex();

    // One plan for the whole frame, reused across all antenna pairs.
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(nsample);
    let mut scratch = vec![Complex64::new(0.0, 0.0); fft.get_inplace_scratch_len()];
    let mut buffer = vec![Complex64::new(0.0, 0.0); nsample];

    let mut profile = Array3::zeros((ntx, nrx, nsample));
    for tx in 0..ntx {
        for rx in 0..nrx {
            for chirp in 0..nchirp {
                let row = complex.slice(s![tx, rx, chirp, ..]);
                for (dst, &src) in buffer.iter_mut().zip(row.iter()) {
                    *dst = src;
                }
                fft.process_with_scratch(&mut buffer, &mut scratch);
                for (bin, &value) in buffer.iter().enumerate() {
                    profile[[tx, rx, bin]] += value;
                }
            }
        }
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameDims;

    const EPSILON: f64 = 1e-9;

    fn frame_from_samples(samples: &[i16], dims: FrameDims) -> RawFrame {
        let buffer: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        RawFrame::from_bytes(&buffer, dims).unwrap()
    }

    fn assert_approx(actual: Complex64, expected: Complex64) {
        assert!(
            (actual.re - expected.re).abs() < EPSILON
                && (actual.im - expected.im).abs() < EPSILON,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_dc_signal_lands_in_bin_zero() {
        let dims = FrameDims {
            ntx: 1,
            nrx: 1,
            nchirp: 1,
            nsample: 4,
        };
        // Constant I = 1, Q = 0: everything ends up in bin 0 with value nsample.
        let frame = frame_from_samples(&[1, 0, 1, 0, 1, 0, 1, 0], dims);

        let profile = range_profile(&frame);
        assert_eq!(profile.dim(), (1, 1, 4));
        assert_approx(profile[[0, 0, 0]], Complex64::new(4.0, 0.0));
        for bin in 1..4 {
            assert_approx(profile[[0, 0, bin]], Complex64::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_impulse_spreads_flat() {
        let dims = FrameDims {
            ntx: 1,
            nrx: 1,
            nchirp: 1,
            nsample: 4,
        };
        // Unit impulse at sample 0: flat spectrum of ones.
        let frame = frame_from_samples(&[1, 0, 0, 0, 0, 0, 0, 0], dims);

        let profile = range_profile(&frame);
        for bin in 0..4 {
            assert_approx(profile[[0, 0, bin]], Complex64::new(1.0, 0.0));
        }
    }

    #[test]
    fn test_chirps_sum_coherently() {
        let dims = FrameDims {
            ntx: 1,
            nrx: 1,
            nchirp: 2,
            nsample: 4,
        };
        // Two identical impulse chirps: the summed spectrum doubles.
        let one_chirp = [1i16, 0, 0, 0, 0, 0, 0, 0];
        let samples: Vec<i16> = one_chirp.iter().chain(one_chirp.iter()).copied().collect();
        let frame = frame_from_samples(&samples, dims);

        let profile = range_profile(&frame);
        for bin in 0..4 {
            assert_approx(profile[[0, 0, bin]], Complex64::new(2.0, 0.0));
        }
    }

    #[test]
    fn test_matches_naive_dft() {
        let dims = FrameDims {
            ntx: 1,
            nrx: 1,
            nchirp: 1,
            nsample: 4,
        };
        let samples = [3i16, -1, 0, 4, -2, 2, 5, 0];
        let frame = frame_from_samples(&samples, dims);
        let profile = range_profile(&frame);

        let signal: Vec<Complex64> = samples
            .chunks_exact(2)
            .map(|iq| Complex64::new(iq[0] as f64, iq[1] as f64))
            .collect();
        for bin in 0..4 {
            let mut expected = Complex64::new(0.0, 0.0);
            for (n, &x) in signal.iter().enumerate() {
                let angle = -2.0 * std::f64::consts::PI * (bin * n) as f64 / 4.0;
                expected += x * Complex64::new(angle.cos(), angle.sin());
            }
            assert_approx(profile[[0, 0, bin]], expected);
        }
    }
}
