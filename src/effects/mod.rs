//! Signal effects: silence trimming and splitting.

pub mod trim;

pub use trim::{TrimConfig, signal_to_frame_nonsilent, split, trim};
