use crate::convert::frame_to_sample;
use crate::feature::{RmsConfig, RmsInput, rms};
use crate::spectrum::{AMPLITUDE_AMIN, Reference, amplitude_to_db};
use crate::utils::{Reduction, Sample};
use log::debug;
use ndarray::{Array1, ArrayBase, ArrayView, Axis, Data, Dimension, Slice};

/// Parameters shared by [`trim`], [`split`] and [`signal_to_frame_nonsilent`].
#[derive(Debug, Clone, Copy)]
pub struct TrimConfig {
    /// Threshold in dB below the reference under which a frame is silent.
    ///
    /// A negative value treats anything below `ref + |top_db|` as silent;
    /// this only makes sense with a fixed [`Reference::Value`].
    pub top_db: f64,
    /// Reference amplitude. Defaults to the peak frame RMS.
    pub reference: Reference,
    /// Samples per analysis frame.
    pub frame_length: usize,
    /// Samples between analysis frames.
    pub hop_length: usize,
    /// Aggregates dB values across channels for multi-channel input.
    pub aggregate: Reduction,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            top_db: 60.0,
            reference: Reference::Reduce(Reduction::Max),
            frame_length: 2048,
            hop_length: 512,
            aggregate: Reduction::Max,
        }
    }
}

/// Frame-wise non-silence indicator.
///
/// Computes centred frame RMS, converts it to dB relative to
/// `config.reference` (no dynamic-range clamping), collapses every leading
/// channel axis with `config.aggregate`, and marks a frame non-silent when
/// its level is above `-top_db`.
///
/// # Returns
/// One boolean per frame.
pub fn signal_to_frame_nonsilent<A, S, D>(
    y: &ArrayBase<S, D>,
    config: &TrimConfig,
) -> crate::Result<Array1<bool>>
where
    A: Sample,
    S: Data<Elem = A>,
    D: Dimension,
{
    let rms_config = RmsConfig {
        frame_length: config.frame_length,
        hop_length: config.hop_length,
        ..Default::default()
    };
    let mse = rms(RmsInput::Samples(y.view().into_dyn()), &rms_config)?;

    // (..., 1, t) -> (..., t)
    let channel_axis = Axis(mse.ndim() - 2);
    let mse = mse.index_axis_move(channel_axis, 0);

    let db = amplitude_to_db(&mse, config.reference, AMPLITUDE_AMIN, None)?;
    let mut db = db.mapv(f64::from);
    while db.ndim() > 1 {
        db = db.map_axis(Axis(0), |lane| config.aggregate.apply_array(&lane));
    }

    Ok(db.iter().map(|&v| v > -config.top_db).collect())
}

/// Trim leading and trailing silence from an audio signal.
///
/// Silence is any frame more than `top_db` below the reference level. The
/// returned interval starts at the first non-silent frame and ends one hop
/// past the last one, clipped to the signal length. If no frame is
/// non-silent the interval is `(0, 0)`.
///
/// With the default peak reference a signal of uniform level (including an
/// all-zero signal) has no frame quieter than its own maximum, so nothing is
/// trimmed. Use a fixed [`Reference::Value`] to trim such signals.
///
/// # Arguments
/// * `y` - Signal of shape `(..., n)`; leading axes are channels
/// * `config` - Threshold, reference, framing and channel aggregation
///
/// # Returns
/// The trimmed view `y[..., start..end]` and `(start, end)`.
///
/// # Example
/// ```
/// use hush::effects::{TrimConfig, trim};
/// use ndarray::Array1;
///
/// let mut y = Array1::<f32>::zeros(1000);
/// y.slice_mut(ndarray::s![200..400]).fill(1.0);
/// let config = TrimConfig { frame_length: 100, hop_length: 50, ..Default::default() };
/// let (trimmed, (start, end)) = trim(&y, &config).unwrap();
/// assert_eq!((start, end), (200, 450));
/// assert_eq!(trimmed.len(), 250);
/// ```
pub fn trim<'a, A, S, D>(
    y: &'a ArrayBase<S, D>,
    config: &TrimConfig,
) -> crate::Result<(ArrayView<'a, A, D>, (usize, usize))>
where
    A: Sample,
    S: Data<Elem = A>,
    D: Dimension,
{
    let non_silent = signal_to_frame_nonsilent(y, config)?;
    let time = Axis(y.ndim() - 1);
    let len = y.len_of(time);

    let (start, end) = match non_silent.iter().position(|&v| v) {
        Some(first) => {
            let last = non_silent.iter().rposition(|&v| v).unwrap_or(first);
            let start = frame_to_sample(first, config.hop_length, None);
            let end = len.min(frame_to_sample(last + 1, config.hop_length, None));
            (start, end)
        }
        None => (0, 0),
    };
    debug!("trim: kept samples [{start}, {end}) of {len}");

    Ok((y.slice_axis(time, Slice::from(start..end)), (start, end)))
}

/// Split a signal into non-silent intervals.
///
/// Uses the same frame classification as [`trim`]; each interval runs from
/// a silent-to-loud transition to the next loud-to-silent transition,
/// converted to samples and clipped to the signal length.
///
/// # Returns
/// `(start, end)` sample intervals in increasing order.
pub fn split<A, S, D>(y: &ArrayBase<S, D>, config: &TrimConfig) -> crate::Result<Vec<(usize, usize)>>
where
    A: Sample,
    S: Data<Elem = A>,
    D: Dimension,
{
    let non_silent = signal_to_frame_nonsilent(y, config)?.to_vec();
    let len = y.len_of(Axis(y.ndim() - 1));

    let mut edges = Vec::new();
    if non_silent.first() == Some(&true) {
        edges.push(0);
    }
    edges.extend((1..non_silent.len()).filter(|&i| non_silent[i] != non_silent[i - 1]));
    if non_silent.last() == Some(&true) {
        edges.push(non_silent.len());
    }

    let to_sample = |frame: usize| len.min(frame_to_sample(frame, config.hop_length, None));
    let intervals: Vec<(usize, usize)> = edges
        .chunks_exact(2)
        .map(|pair| (to_sample(pair[0]), to_sample(pair[1])))
        .collect();
    debug!("split: {} non-silent interval(s)", intervals.len());

    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    fn small() -> TrimConfig {
        TrimConfig {
            frame_length: 100,
            hop_length: 50,
            ..Default::default()
        }
    }

    fn burst(len: usize, start: usize, end: usize) -> Array1<f32> {
        let mut y = Array1::<f32>::zeros(len);
        y.slice_axis_mut(Axis(0), Slice::from(start..end)).fill(1.0);
        y
    }

    #[test]
    fn mask_marks_loud_frames() {
        let y = burst(1000, 200, 400);
        let mask = signal_to_frame_nonsilent(&y, &small()).unwrap();
        assert_eq!(mask.len(), 21);
        let loud: Vec<usize> = (0..mask.len()).filter(|&i| mask[i]).collect();
        assert_eq!(loud, vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn fixed_reference_trims_silence_completely() {
        let y = Array1::<f32>::zeros(1000);
        let config = TrimConfig {
            reference: Reference::Value(1.0),
            ..small()
        };
        let (trimmed, interval) = trim(&y, &config).unwrap();
        assert_eq!(interval, (0, 0));
        assert!(trimmed.is_empty());
    }

    #[test]
    fn negative_top_db_requires_level_above_reference() {
        let y = Array1::from_elem(1000, 0.5f32);
        // 0.5 relative to 0.1 is ~14 dB
        let loud_enough = TrimConfig {
            top_db: -10.0,
            reference: Reference::Value(0.1),
            ..small()
        };
        let (_, interval) = trim(&y, &loud_enough).unwrap();
        assert_eq!(interval, (0, 1000));

        let too_quiet = TrimConfig {
            top_db: -20.0,
            ..loud_enough
        };
        let (_, interval) = trim(&y, &too_quiet).unwrap();
        assert_eq!(interval, (0, 0));
    }

    #[test]
    fn channels_are_aggregated() {
        let mut y = Array2::<f32>::zeros((2, 1000));
        y.row_mut(0).slice_axis_mut(Axis(0), Slice::from(200..400)).fill(1.0);
        y.row_mut(1).slice_axis_mut(Axis(0), Slice::from(600..800)).fill(1.0);

        let (trimmed, interval) = trim(&y, &small()).unwrap();
        assert_eq!(interval, (200, 850));
        assert_eq!(trimmed.shape(), &[2, 650]);

        // no frame is loud in both channels at once
        let min = TrimConfig {
            aggregate: Reduction::Min,
            ..small()
        };
        let (trimmed, interval) = trim(&y, &min).unwrap();
        assert_eq!(interval, (0, 0));
        assert_eq!(trimmed.shape(), &[2, 0]);
    }

    #[test]
    fn nan_sample_silences_every_frame() {
        let mut y = burst(1000, 200, 400);
        y[600] = f32::NAN;
        let mask = signal_to_frame_nonsilent(&y, &small()).unwrap();
        assert!(mask.iter().all(|&v| !v));

        let (trimmed, interval) = trim(&y, &small()).unwrap();
        assert_eq!(interval, (0, 0));
        assert!(trimmed.is_empty());
        assert!(split(&y, &small()).unwrap().is_empty());
    }

    #[test]
    fn split_finds_each_burst() {
        let mut y = burst(2000, 200, 400);
        y.slice_axis_mut(Axis(0), Slice::from(1200..1500)).fill(0.5);
        let intervals = split(&y, &small()).unwrap();
        assert_eq!(intervals, vec![(200, 450), (1200, 1550)]);
    }

    #[test]
    fn split_of_loud_signal_is_whole_signal() {
        let y = Array1::from_elem(1000, 0.3f64);
        assert_eq!(split(&y, &small()).unwrap(), vec![(0, 1000)]);
    }
}
