//! Calibration matrix generation for a cascaded MIMO mmwave radar array.
//!
//! Two independent pipelines operate on a single raw ADC frame:
//!  - Coupling calibration: with no target in reach, estimate the residual
//!    antenna-to-antenna leakage as the mean I/Q value per (tx, rx) pair.
//!  - Waveform calibration: with a reflector at a known reference distance,
//!    derive per-antenna phase/amplitude and frequency corrections from the
//!    range spectrum, relative to the (tx 0, rx 0) reference antenna.
//!
//! Both pipelines share the frame layout logic in [`RawFrame`], which is the
//! single source of truth for how the flat ADC capture maps onto the
//! (tx, rx, chirp, sample, I/Q) axes.

mod config;
mod coupling;
mod errors;
mod frame;
mod persistence;
mod range;
mod waveform;
mod window;

// Public re-export
pub use crate::config::CalibrationConfig;
pub use crate::coupling::coupling_calibration;
pub use crate::errors::{CalibrationError, ConfigError, FormatError, PersistenceError};
pub use crate::frame::{FrameDims, RawFrame};
pub use crate::persistence::{
    write_context, write_coupling, write_frequency, write_phase_amplitude, CouplingContext,
    WaveformContext, WaveformDataFiles, COUPLING_CONTEXT_FILE, COUPLING_DATA_FILE,
    FREQUENCY_DATA_FILE, PHASE_AMP_DATA_FILE, WAVEFORM_CONTEXT_FILE,
};
pub use crate::range::range_profile;
pub use crate::waveform::{
    locate_peaks, waveform_calibration, PeakTable, WaveformCalibration,
};
pub use crate::window::{reference_window, ReferenceWindow, SPEED_OF_LIGHT};
