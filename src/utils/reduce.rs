use ndarray::{ArrayBase, Data, Dimension};

/// Scalar reduction over a set of values.
///
/// Used both to derive a dB reference level from a signal and to aggregate
/// per-channel dB values into a single value per frame.
#[derive(Clone, Copy, Default)]
pub enum Reduction {
    /// Largest value; NaN if any value is NaN.
    #[default]
    Max,
    /// Smallest value; NaN if any value is NaN.
    Min,
    /// Arithmetic mean.
    Mean,
    /// Median; the mean of the two middle values for even counts. NaN if
    /// any value is NaN.
    Median,
    /// Caller-supplied reduction.
    Custom(fn(&[f64]) -> f64),
}

impl std::fmt::Debug for Reduction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reduction::Max => f.write_str("Max"),
            Reduction::Min => f.write_str("Min"),
            Reduction::Mean => f.write_str("Mean"),
            Reduction::Median => f.write_str("Median"),
            Reduction::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Reduction {
    /// Reduce a slice of values to a scalar.
    ///
    /// Empty input yields `-inf` for `Max`, `+inf` for `Min` and NaN for
    /// `Mean`/`Median`.
    pub fn apply(&self, values: &[f64]) -> f64 {
        match self {
            Reduction::Max => values.iter().copied().fold(f64::NEG_INFINITY, nan_max),
            Reduction::Min => values.iter().copied().fold(f64::INFINITY, nan_min),
            Reduction::Mean => {
                if values.is_empty() {
                    return f64::NAN;
                }
                values.iter().sum::<f64>() / values.len() as f64
            }
            Reduction::Median => median(values),
            Reduction::Custom(func) => func(values),
        }
    }

    /// Reduce every element of an array, regardless of its layout.
    pub fn apply_array<S, D>(&self, values: &ArrayBase<S, D>) -> f64
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        match values.as_slice() {
            Some(slice) => self.apply(slice),
            None => self.apply(&values.iter().copied().collect::<Vec<_>>()),
        }
    }
}

/// `max` that returns NaN when either side is NaN.
pub(crate) fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() || values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        0.5 * (sorted[mid - 1] + sorted[mid])
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn builtin_reductions() {
        let v = [3.0, -1.0, 4.0, 1.5];
        assert_eq!(Reduction::Max.apply(&v), 4.0);
        assert_eq!(Reduction::Min.apply(&v), -1.0);
        assert_relative_eq!(Reduction::Mean.apply(&v), 1.875);
        assert_relative_eq!(Reduction::Median.apply(&v), 2.25);
        assert_eq!(Reduction::Median.apply(&[5.0, 1.0, 3.0]), 3.0);
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(Reduction::Max.apply(&[]), f64::NEG_INFINITY);
        assert!(Reduction::Median.apply(&[]).is_nan());
        assert!(Reduction::Mean.apply(&[]).is_nan());
    }

    #[test]
    fn nan_propagates() {
        let v = [1.0, f64::NAN, 3.0];
        assert!(Reduction::Max.apply(&v).is_nan());
        assert!(Reduction::Min.apply(&v).is_nan());
        assert!(Reduction::Mean.apply(&v).is_nan());
        assert!(Reduction::Median.apply(&v).is_nan());
        assert!(Reduction::Max.apply(&[f64::NAN, 2.0]).is_nan());
    }

    #[test]
    fn custom_reduction() {
        fn first(values: &[f64]) -> f64 {
            values.first().copied().unwrap_or(0.0)
        }
        let r = Reduction::Custom(first);
        assert_eq!(r.apply(&[7.0, 8.0]), 7.0);
        assert_eq!(format!("{r:?}"), "Custom(..)");
    }

    #[test]
    fn non_contiguous_array() {
        let a = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]];
        let col = a.column(1);
        assert_eq!(Reduction::Max.apply_array(&col), 30.0);
        assert_relative_eq!(Reduction::Mean.apply_array(&a.t()), 11.0);
    }
}
