/// Crate-level error type for the hush silence-trimming library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The framing axis holds fewer samples than one frame.
    #[error("input is too short (n={len}) for frame_length={frame_length}")]
    InputTooShort { len: usize, frame_length: usize },

    /// Frames cannot advance.
    #[error("invalid hop_length: {hop_length} (must be >= 1)")]
    InvalidHopLength { hop_length: usize },

    /// A required dimension is zero or invalid.
    #[error("invalid size for `{name}`: {value} ({reason})")]
    InvalidSize {
        name: &'static str,
        value: usize,
        reason: &'static str,
    },

    /// Axis index does not exist on the input array.
    #[error("axis {axis} is out of bounds for an array with {ndim} dimension(s)")]
    InvalidAxis { axis: isize, ndim: usize },

    /// The RMS estimator needs exactly one of samples or spectrogram.
    #[error("either `y` or `S` must be input (exactly one of them)")]
    MissingInput,

    /// Input array has incorrect shape for the operation.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// The dB floor must be strictly positive.
    #[error("amin must be strictly positive, got {amin}")]
    InvalidFloor { amin: f64 },

    /// The dB dynamic range must be non-negative.
    #[error("top_db must be non-negative, got {top_db}")]
    InvalidDynamicRange { top_db: f64 },

    /// Invalid parameter value.
    #[error("invalid parameter `{name}`: got {value}, {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Convenience Result type for hush operations.
pub type Result<T> = std::result::Result<T, Error>;
