//! Persistence of calibration matrices.
//!
//! The binary layout matches the files the radar processing chain already
//! consumes: flat little-endian arrays in row-major order.
//!
//!  - Coupling: (ntx, nrx, 2) f32, per pair (mean I, mean Q) innermost.
//!  - Frequency: (ntx, nrx) f64.
//!  - Phase/amplitude: (ntx, nrx, 2) f64, (re, im) innermost.
//!
//! Each calibration run also produces a small JSON context file naming the
//! antenna counts and the data files written.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::{Array2, Array3};
use num_complex::Complex64;
use serde::Serialize;

use crate::errors::PersistenceError;

pub const COUPLING_DATA_FILE: &str = "coupling_calibration.bin";
pub const FREQUENCY_DATA_FILE: &str = "frequency_calibration.bin";
pub const PHASE_AMP_DATA_FILE: &str = "phase_amp_calibration.bin";
pub const COUPLING_CONTEXT_FILE: &str = "coupling_cfg.json";
pub const WAVEFORM_CONTEXT_FILE: &str = "waveform_calib_cfg.json";

/// Context sidecar of a coupling calibration run.
#[derive(Debug, Clone, Serialize)]
pub struct CouplingContext {
    pub ntx: usize,
    pub nrx: usize,
    pub data: String,
}

/// Context sidecar of a waveform calibration run.
#[derive(Debug, Clone, Serialize)]
pub struct WaveformContext {
    pub ntx: usize,
    pub nrx: usize,
    pub data: WaveformDataFiles,
}

#[derive(Debug, Clone, Serialize)]
pub struct WaveformDataFiles {
    pub frequency: String,
    pub phase: String,
}

/// Write the coupling matrix as (ntx, nrx, 2) f32, (mean I, mean Q) innermost.
pub fn write_coupling(
    path: &Path,
    coupling: &Array2<Complex64>,
) -> Result<(), PersistenceError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for value in coupling.iter() {
        writer.write_all(&(value.re as f32).to_le_bytes())?;
        writer.write_all(&(value.im as f32).to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the frequency calibration matrix as (ntx, nrx) f64.
pub fn write_frequency(path: &Path, frequency: &Array2<f64>) -> Result<(), PersistenceError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for value in frequency.iter() {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the phase/amplitude calibration matrix as (ntx, nrx, 2) f64.
pub fn write_phase_amplitude(
    path: &Path,
    phase_amplitude: &Array3<f64>,
) -> Result<(), PersistenceError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for value in phase_amplitude.iter() {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a run's JSON context sidecar.
pub fn write_context<T: Serialize>(path: &Path, context: &T) -> Result<(), PersistenceError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), context)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::path::PathBuf;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mmcal_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_coupling_layout() {
        let coupling = array![[
            Complex64::new(1.5, -2.0),
            Complex64::new(0.25, 8.0)
        ]];
        let path = scratch_file("coupling.bin");
        write_coupling(&path, &coupling).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        // (1, 2) complex matrix -> 4 f32 values, (re, im) interleaved.
        assert_eq!(bytes.len(), 16);
        let values: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(values, vec![1.5, -2.0, 0.25, 8.0]);
    }

    #[test]
    fn test_frequency_layout() {
        let frequency = array![[0.0, -1.25], [3.5, 42.0]];
        let path = scratch_file("frequency.bin");
        write_frequency(&path, &frequency).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(bytes.len(), 32);
        let values: Vec<f64> = bytes
            .chunks_exact(8)
            .map(|c| f64::from_le_bytes(c.try_into().unwrap()))
            .collect();
        // Row-major: rows of the tx axis in order.
        assert_eq!(values, vec![0.0, -1.25, 3.5, 42.0]);
    }

    #[test]
    fn test_phase_amplitude_layout() {
        let phase = array![[[1.0, 0.0], [0.5, -0.5]]];
        let path = scratch_file("phase.bin");
        write_phase_amplitude(&path, &phase).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(bytes.len(), 32);
        let values: Vec<f64> = bytes
            .chunks_exact(8)
            .map(|c| f64::from_le_bytes(c.try_into().unwrap()))
            .collect();
        assert_eq!(values, vec![1.0, 0.0, 0.5, -0.5]);
    }

    #[test]
    fn test_context_sidecar_shape() {
        let context = WaveformContext {
            ntx: 12,
            nrx: 16,
            data: WaveformDataFiles {
                frequency: FREQUENCY_DATA_FILE.into(),
                phase: PHASE_AMP_DATA_FILE.into(),
            },
        };
        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["ntx"], 12);
        assert_eq!(json["data"]["frequency"], "frequency_calibration.bin");
        assert_eq!(json["data"]["phase"], "phase_amp_calibration.bin");
    }
}
