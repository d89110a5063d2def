use crate::frame;
use crate::spectrum::PadMode;
use crate::utils::{Real, Sample, pad_axis};
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};

/// Configuration for [`rms`].
#[derive(Debug, Clone)]
pub struct RmsConfig {
    /// Length of the analysis frame, in samples.
    pub frame_length: usize,
    /// Samples between successive frames. Unused for spectrogram input.
    pub hop_length: usize,
    /// Pad the time axis by `frame_length / 2` on both sides before framing.
    /// Unused for spectrogram input.
    pub center: bool,
    pub pad_mode: PadMode,
}

impl Default for RmsConfig {
    fn default() -> Self {
        Self {
            frame_length: 2048,
            hop_length: 512,
            center: true,
            pad_mode: PadMode::Constant,
        }
    }
}

/// Input to the RMS estimator: raw samples or a precomputed spectrogram.
#[derive(Debug, Clone)]
pub enum RmsInput<'a, A> {
    /// Audio samples, shape `(..., n)`.
    Samples(ArrayViewD<'a, A>),
    /// Spectrogram magnitudes, shape `(..., d, t)` with `d = frame_length / 2 + 1`.
    Spectrogram(ArrayViewD<'a, A>),
}

impl<'a, A> RmsInput<'a, A> {
    /// Build an input from optional samples `y` and spectrogram `s`.
    ///
    /// # Errors
    /// [`Error::MissingInput`](crate::Error::MissingInput) unless exactly one
    /// of the two is given.
    pub fn from_options(
        y: Option<ArrayViewD<'a, A>>,
        s: Option<ArrayViewD<'a, A>>,
    ) -> crate::Result<Self> {
        match (y, s) {
            (Some(y), None) => Ok(RmsInput::Samples(y)),
            (None, Some(s)) => Ok(RmsInput::Spectrogram(s)),
            _ => Err(crate::Error::MissingInput),
        }
    }
}

/// Compute the root-mean-square value of each frame as `f32`.
///
/// See [`rms_as`] for details.
///
/// # Example
/// ```
/// use hush::feature::{RmsConfig, RmsInput, rms};
/// use ndarray::Array1;
///
/// let y = Array1::from_elem(22050, 0.5f32);
/// let cfg = RmsConfig::default();
/// let r = rms(RmsInput::Samples(y.view().into_dyn()), &cfg).unwrap();
/// assert_eq!(r.shape(), &[1, 44]);
/// // interior frames see only the constant signal
/// assert!((r[[0, 20]] - 0.5).abs() < 1e-6);
/// ```
pub fn rms<A: Sample>(input: RmsInput<'_, A>, config: &RmsConfig) -> crate::Result<ArrayD<f32>> {
    rms_as::<A, f32>(input, config)
}

/// Compute the root-mean-square value of each frame, with output type `T`.
///
/// From samples, the (optionally centred) signal is framed along its last
/// axis and the mean of `|x|^2` is taken over each frame. From a spectrogram
/// the energy is summed over the frequency axis, with the DC bin (and, for
/// even `frame_length`, the Nyquist bin) halved to undo one-sided folding,
/// and scaled by `2 / frame_length^2`.
///
/// # Returns
/// Array of shape `(..., 1, n_frames)`; all values are non-negative.
///
/// # Errors
/// - [`Error::ShapeMismatch`](crate::Error::ShapeMismatch) if the spectrogram's
///   frequency axis does not match `frame_length`, or the input has too few
///   dimensions
/// - [`Error::InputTooShort`](crate::Error::InputTooShort) /
///   [`Error::InvalidHopLength`](crate::Error::InvalidHopLength) from framing
pub fn rms_as<A: Sample, T: Real>(
    input: RmsInput<'_, A>,
    config: &RmsConfig,
) -> crate::Result<ArrayD<T>> {
    if config.frame_length == 0 {
        return Err(crate::Error::InvalidSize {
            name: "frame_length",
            value: 0,
            reason: "must be > 0",
        });
    }
    let power = match input {
        RmsInput::Samples(y) => power_from_samples(y, config)?,
        RmsInput::Spectrogram(s) => power_from_spectrogram(s, config.frame_length)?,
    };
    Ok(power.mapv(|p| T::from_f64(p.sqrt())))
}

fn power_from_samples<A: Sample>(y: ArrayViewD<'_, A>, config: &RmsConfig) -> crate::Result<ArrayD<f64>> {
    let ndim = y.ndim();
    if ndim == 0 {
        return Err(crate::Error::ShapeMismatch {
            expected: "signal with at least 1 dimension".to_string(),
            got: "0-dimensional array".to_string(),
        });
    }
    let time = Axis(ndim - 1);
    let frame_length = config.frame_length;

    let padded;
    let y = if config.center {
        padded = pad_axis(&y, time, frame_length / 2, config.pad_mode)?;
        padded.view()
    } else {
        y.reborrow()
    };

    let frames = frame::frame(y, frame_length, config.hop_length, -1)?;

    // (..., n) -> (..., 1, n_frames)
    let mut shape = frames.shape().to_vec();
    shape[ndim - 1] = 1;
    let mut power = ArrayD::<f64>::zeros(IxDyn(&shape));

    let scale = 1.0 / frame_length as f64;
    for (j, window) in frames.frames().enumerate() {
        let mean_square = window.map_axis(time, |lane| {
            lane.iter().map(|v| v.abs2()).sum::<f64>() * scale
        });
        power
            .index_axis_mut(Axis(ndim), j)
            .index_axis_move(Axis(ndim - 1), 0)
            .assign(&mean_square);
    }
    Ok(power)
}

fn power_from_spectrogram<A: Sample>(
    s: ArrayViewD<'_, A>,
    frame_length: usize,
) -> crate::Result<ArrayD<f64>> {
    let ndim = s.ndim();
    if ndim < 2 {
        return Err(crate::Error::ShapeMismatch {
            expected: "spectrogram with shape (..., d, t)".to_string(),
            got: format!("{ndim}-dimensional array"),
        });
    }
    let freq = Axis(ndim - 2);
    let n_bins = s.len_of(freq);
    if n_bins != frame_length / 2 + 1 {
        return Err(crate::Error::ShapeMismatch {
            expected: format!(
                "frame_length of {} or {} for {} frequency bins",
                (2 * n_bins).saturating_sub(2),
                (2 * n_bins).saturating_sub(1),
                n_bins
            ),
            got: format!("frame_length={frame_length}"),
        });
    }

    let mut x = s.mapv(|v| v.abs2());
    x.index_axis_mut(freq, 0).mapv_inplace(|v| v * 0.5);
    if frame_length % 2 == 0 {
        x.index_axis_mut(freq, n_bins - 1).mapv_inplace(|v| v * 0.5);
    }

    let scale = 2.0 / (frame_length as f64 * frame_length as f64);
    Ok(x.sum_axis(freq).insert_axis(freq).mapv_into(|p| p * scale))
}
