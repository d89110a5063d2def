//! Frame-wise signal features.

pub mod rms;

pub use rms::{RmsConfig, RmsInput, rms, rms_as};
