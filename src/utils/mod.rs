mod complex;
mod framing;
mod reduce;

// Sample element types
pub use complex::{Real, Sample, abs2};

// Framing and padding helpers
pub use framing::{frame_count, pad_axis};

// Scalar reductions used for dB references and channel aggregation
pub use reduce::Reduction;
pub(crate) use reduce::nan_max;
