use crate::utils::{Real, Reduction, Sample, nan_max};
use log::warn;
use ndarray::{Array, ArrayBase, Data, Dimension};

/// Default `amin` floor for [`power_to_db`].
pub const POWER_AMIN: f64 = 1e-10;
/// Default `amin` floor for [`amplitude_to_db`].
pub const AMPLITUDE_AMIN: f64 = 1e-5;
/// Default dynamic range for the dB converters.
pub const DEFAULT_TOP_DB: f64 = 80.0;

/// How an axis is extended before centred framing (numpy `pad` modes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PadMode {
    /// Zeros.
    #[default]
    Constant,
    /// Repeat the edge value.
    Edge,
    /// Mirror about the edge sample, excluding it: `3 2 | 1 2 3 | 2 1`.
    Reflect,
    /// Mirror including the edge sample: `2 1 | 1 2 3 | 3 2`.
    Symmetric,
    /// Wrap around: `2 3 | 1 2 3 | 1 2`.
    Wrap,
}

impl PadMode {
    /// Source position for padded position `idx` of an axis of length `len`,
    /// or `None` when the position holds the constant fill.
    pub(crate) fn source_index(self, idx: isize, len: usize) -> Option<usize> {
        let n = len as isize;
        if (0..n).contains(&idx) {
            return Some(idx as usize);
        }
        if len == 0 {
            return None;
        }
        let j = match self {
            PadMode::Constant => return None,
            PadMode::Edge => idx.clamp(0, n - 1),
            PadMode::Reflect => {
                if n == 1 {
                    0
                } else {
                    let period = 2 * (n - 1);
                    let m = idx.rem_euclid(period);
                    if m < n { m } else { period - m }
                }
            }
            PadMode::Symmetric => {
                let period = 2 * n;
                let m = idx.rem_euclid(period);
                if m < n { m } else { period - 1 - m }
            }
            PadMode::Wrap => idx.rem_euclid(n),
        };
        Some(j as usize)
    }
}

/// Reference level for dB scaling.
#[derive(Debug, Clone, Copy)]
pub enum Reference {
    /// Fixed level; its absolute value is used.
    Value(f64),
    /// Level derived from the input, e.g. `Reduce(Reduction::Max)` for
    /// "relative to the peak".
    Reduce(Reduction),
}

impl Default for Reference {
    fn default() -> Self {
        Reference::Value(1.0)
    }
}

impl From<f64> for Reference {
    fn from(value: f64) -> Self {
        Reference::Value(value)
    }
}

impl From<Reduction> for Reference {
    fn from(reduction: Reduction) -> Self {
        Reference::Reduce(reduction)
    }
}

impl Reference {
    fn resolve<S, D>(&self, values: &ArrayBase<S, D>) -> f64
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        match self {
            Reference::Value(v) => v.abs(),
            Reference::Reduce(reduction) => reduction.apply_array(values),
        }
    }
}

fn check_amin(amin: f64) -> crate::Result<()> {
    if amin.is_nan() || amin <= 0.0 {
        return Err(crate::Error::InvalidFloor { amin });
    }
    Ok(())
}

fn check_top_db(top_db: Option<f64>) -> crate::Result<()> {
    match top_db {
        Some(top) if top.is_nan() || top < 0.0 => Err(crate::Error::InvalidDynamicRange { top_db: top }),
        _ => Ok(()),
    }
}

/// `10 * log10(max(amin, p)) - 10 * log10(max(amin, ref))`, then clamp to
/// `max - top_db`. NaN is never floored away: a NaN power or reference
/// yields NaN.
fn db_scale<D: Dimension>(
    power: Array<f64, D>,
    ref_value: f64,
    amin: f64,
    top_db: Option<f64>,
) -> Array<f64, D> {
    let log_ref = 10.0 * nan_max(ref_value, amin).log10();
    let mut db = power.mapv_into(|p| 10.0 * nan_max(p, amin).log10() - log_ref);

    if let Some(top) = top_db {
        let max_db = db.iter().copied().fold(f64::NEG_INFINITY, nan_max);
        let threshold = max_db - top;
        db.mapv_inplace(|v| nan_max(v, threshold));
    }
    db
}

/// Convert a power spectrogram (amplitude squared) to dB.
///
/// Computes `10 * log10(S / ref)` in a numerically stable way: both `S` and
/// the reference are floored at `amin` before the logarithm. With
/// `top_db = Some(t)` every value is raised to at least `max - t`.
///
/// Complex input is reduced to its magnitude and a warning is logged.
///
/// # Errors
/// [`Error::InvalidFloor`](crate::Error::InvalidFloor) if `amin <= 0`,
/// [`Error::InvalidDynamicRange`](crate::Error::InvalidDynamicRange) if `top_db < 0`.
///
/// # Example
/// ```
/// use hush::spectrum::{Reference, power_to_db};
/// use hush::utils::Reduction;
/// use ndarray::array;
///
/// let s = array![1.0f32, 10.0, 100.0];
/// let db = power_to_db(&s, Reference::Reduce(Reduction::Max), 1e-10, None).unwrap();
/// assert!((db[0] + 20.0).abs() < 1e-4);
/// assert!((db[2] - 0.0).abs() < 1e-4);
/// ```
pub fn power_to_db<A, S, D>(
    s: &ArrayBase<S, D>,
    reference: Reference,
    amin: f64,
    top_db: Option<f64>,
) -> crate::Result<Array<A::Real, D>>
where
    A: Sample,
    S: Data<Elem = A>,
    D: Dimension,
{
    check_amin(amin)?;
    check_top_db(top_db)?;
    if A::IS_COMPLEX {
        warn!(
            "power_to_db was called on complex input so phase information will be discarded; \
             pass squared magnitudes instead to silence this warning"
        );
    }

    let power = s.mapv(|v| v.power_value());
    let ref_value = reference.resolve(&power);
    Ok(db_scale(power, ref_value, amin, top_db).mapv(A::Real::from_f64))
}

/// Convert an amplitude spectrogram to dB.
///
/// Equivalent to `power_to_db(|S|^2, ref^2, amin^2, top_db)`, i.e.
/// `20 * log10(|S| / ref)`. A [`Reference::Reduce`] is evaluated on the
/// magnitudes `|S|`, not on their squares.
///
/// # Errors
/// Same conditions as [`power_to_db`].
pub fn amplitude_to_db<A, S, D>(
    s: &ArrayBase<S, D>,
    reference: Reference,
    amin: f64,
    top_db: Option<f64>,
) -> crate::Result<Array<A::Real, D>>
where
    A: Sample,
    S: Data<Elem = A>,
    D: Dimension,
{
    check_amin(amin)?;
    check_top_db(top_db)?;
    if A::IS_COMPLEX {
        warn!(
            "amplitude_to_db was called on complex input so phase information will be discarded; \
             pass magnitudes instead to silence this warning"
        );
    }

    let magnitude = s.mapv(|v| v.magnitude());
    let ref_value = reference.resolve(&magnitude);
    let power = magnitude.mapv_into(|m| m * m);
    let db = db_scale(power, ref_value * ref_value, amin * amin, top_db);
    Ok(db.mapv(A::Real::from_f64))
}

/// Convert dB back to power: `ref * 10^(S_db / 10)`.
pub fn db_to_power<T, S, D>(db: &ArrayBase<S, D>, ref_power: f64) -> Array<T, D>
where
    T: Real,
    S: Data<Elem = T>,
    D: Dimension,
{
    db.mapv(|v| T::from_f64(ref_power * 10.0f64.powf(0.1 * v.to_f64())))
}

/// Convert dB back to amplitude: `ref * 10^(S_db / 20)`.
pub fn db_to_amplitude<T, S, D>(db: &ArrayBase<S, D>, ref_amplitude: f64) -> Array<T, D>
where
    T: Real,
    S: Data<Elem = T>,
    D: Dimension,
{
    db.mapv(|v| T::from_f64(ref_amplitude * 10.0f64.powf(0.05 * v.to_f64())))
}
