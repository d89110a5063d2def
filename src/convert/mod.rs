//! Index conversions between frames, samples and time.

mod timing;

pub use timing::*;
