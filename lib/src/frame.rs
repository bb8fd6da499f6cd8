//! Raw ADC frame loading and reshaping.
//!
//! A capture is a flat binary of little-endian i16 samples, logically shaped
//! (ntx, nrx, nchirp, nsample, 2) with I/Q interleaved innermost. Both the
//! coupling and the waveform pipeline consume frames through this module so
//! the layout invariant lives in exactly one place.

use std::path::Path;

use ndarray::{Array4, Array5};
use num_complex::Complex64;

use crate::errors::FormatError;

/// Logical dimensions of one captured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDims {
    /// Number of transmission antennas
    pub ntx: usize,
    /// Number of reception antennas
    pub nrx: usize,
    /// Number of chirp loops per frame
    pub nchirp: usize,
    /// Number of ADC samples per chirp
    pub nsample: usize,
}

impl FrameDims {
    /// Number of i16 elements a frame of these dimensions holds (I and Q).
    pub fn element_count(&self) -> usize {
        self.ntx * self.nrx * self.nchirp * self.nsample * 2
    }

    /// Expected frame file size in bytes.
    pub fn byte_count(&self) -> usize {
        self.element_count() * std::mem::size_of::<i16>()
    }
}

/// One captured ADC frame, reshaped onto its antenna/chirp/sample axes.
///
/// Immutable once loaded; both calibration pipelines borrow it.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Samples indexed as [tx, rx, chirp, sample, I/Q]
    pub samples: Array5<i16>,
}

impl RawFrame {
    /// Reinterpret a raw capture buffer as a frame of the given dimensions.
    ///
    /// The buffer must hold exactly `ntx * nrx * nchirp * nsample * 2`
    /// little-endian i16 values; any other length is a [`FormatError`].
    pub fn from_bytes(buffer: &[u8], dims: FrameDims) -> Result<Self, FormatError> {
        let expected = dims.byte_count();
        if buffer.len() != expected {
            return Err(FormatError::SizeMismatch {
                expected,
                actual: buffer.len(),
            });
        }

        let samples: Vec<i16> = buffer
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        let shape = (dims.ntx, dims.nrx, dims.nchirp, dims.nsample, 2);
        let samples =
            Array5::from_shape_vec(shape, samples).expect("buffer length checked against dims");

        Ok(Self { samples })
    }

    /// Read a frame from a flat binary capture file.
    pub fn from_file<P: AsRef<Path>>(path: P, dims: FrameDims) -> Result<Self, FormatError> {
        log::trace!("Loading radar frame from {}", path.as_ref().display());
        let buffer = std::fs::read(path)?;
        Self::from_bytes(&buffer, dims)
    }

    /// Dimensions of this frame, recovered from the array shape.
    pub fn dims(&self) -> FrameDims {
        let (ntx, nrx, nchirp, nsample, _) = self.samples.dim();
        FrameDims {
            ntx,
            nrx,
            nchirp,
            nsample,
        }
    }

    /// Combine the I/Q axis into complex samples (I + jQ).
    pub fn to_complex(&self) -> Array4<Complex64> {
        let FrameDims {
            ntx,
            nrx,
            nchirp,
            nsample,
        } = self.dims();
        Array4::from_shape_fn((ntx, nrx, nchirp, nsample), |(tx, rx, chirp, sample)| {
            Complex64::new(
                self.samples[[tx, rx, chirp, sample, 0]] as f64,
                self.samples[[tx, rx, chirp, sample, 1]] as f64,
            )
        })
    }
}
