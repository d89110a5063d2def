//! Silence trimming for audio signals.
//!
//! Hush finds the leading and trailing regions of a waveform whose energy
//! falls more than `top_db` decibels below a reference level, and returns the
//! waveform with those regions removed together with the retained sample
//! interval. The pipeline follows [librosa](https://librosa.org/)'s
//! `effects.trim`:
//!
//! ```text
//! signal -> frames -> RMS -> dB -> non-silence mask -> sample interval -> slice
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use hush::effects::{TrimConfig, trim};
//! use ndarray::Array1;
//!
//! // 1 s at 1 kHz, loud between samples 200 and 400
//! let mut y = Array1::<f32>::zeros(1000);
//! y.slice_mut(ndarray::s![200..400]).fill(1.0);
//!
//! let config = TrimConfig { frame_length: 100, hop_length: 50, ..Default::default() };
//! let (trimmed, (start, end)) = trim(&y, &config).unwrap();
//! assert_eq!((start, end), (200, 450));
//! assert_eq!(trimmed.len(), end - start);
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`frame`] | Zero-copy overlapping frame views over N-d arrays |
//! | [`feature`] | Frame-wise RMS from samples or a power spectrogram |
//! | [`spectrum`] | Power/amplitude to dB conversion, padding modes |
//! | [`effects`] | Non-silence detection, `trim` and `split` |
//! | [`convert`] | Frame/sample/time index conversions |
//! | [`utils`] | Sample element traits, reductions, padding |
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`], which is an alias for
//! `std::result::Result<T, Error>`. Parameters are validated up front and
//! nothing is repaired silently.
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade: complex input to the dB
//! converters emits a warning, trimming emits debug records. Install any
//! logger (e.g. `env_logger`) to see them.
//!
//! # Safety
//!
//! This crate uses `#![forbid(unsafe_code)]`. Frame views borrow their source
//! array, so the borrow checker rules out concurrent writes through
//! overlapping frames.

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, Result};

pub mod convert;
pub mod effects;
pub mod feature;
pub mod frame;
pub mod spectrum;
pub mod utils;
