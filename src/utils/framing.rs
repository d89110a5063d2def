use crate::spectrum::PadMode;
use ndarray::{Array, ArrayBase, Axis, Data, Dimension, Zip};

/// Compute the number of frames that fit in a signal of given length.
///
/// Returns 0 when the signal is shorter than one frame or `hop_length` is 0.
pub fn frame_count(length: usize, frame_length: usize, hop_length: usize) -> usize {
    if frame_length > length || hop_length == 0 {
        return 0;
    }
    1 + (length - frame_length) / hop_length
}

/// Pad an N-dimensional array by `pad` elements on both ends of `axis`.
///
/// Every lane along `axis` is padded independently according to `mode`;
/// `PadMode::Constant` fills with zeros (`A::default()`).
///
/// # Errors
/// Returns an error if `axis` does not exist, or if a non-constant mode is
/// asked to extend an empty axis.
///
/// # Example
/// ```
/// use hush::spectrum::PadMode;
/// use hush::utils::pad_axis;
/// use ndarray::{Axis, array};
///
/// let x = array![1.0f32, 2.0, 3.0];
/// let p = pad_axis(&x, Axis(0), 2, PadMode::Reflect).unwrap();
/// assert_eq!(p, array![3.0f32, 2.0, 1.0, 2.0, 3.0, 2.0, 1.0]);
/// ```
pub fn pad_axis<A, S, D>(
    x: &ArrayBase<S, D>,
    axis: Axis,
    pad: usize,
    mode: PadMode,
) -> crate::Result<Array<A, D>>
where
    A: Copy + Default,
    S: Data<Elem = A>,
    D: Dimension,
{
    if axis.index() >= x.ndim() {
        return Err(crate::Error::InvalidAxis {
            axis: axis.index() as isize,
            ndim: x.ndim(),
        });
    }
    if pad == 0 {
        return Ok(x.to_owned());
    }

    let len = x.len_of(axis);
    if len == 0 && !matches!(mode, PadMode::Constant) {
        return Err(crate::Error::InvalidParameter {
            name: "pad_mode",
            value: format!("{mode:?}"),
            reason: "cannot extend an empty axis".to_string(),
        });
    }

    let mut dim = x.raw_dim();
    dim[axis.index()] = len + 2 * pad;
    let mut out = Array::from_elem(dim, A::default());

    Zip::from(out.lanes_mut(axis))
        .and(x.lanes(axis))
        .for_each(|mut dst, src| {
            for (i, d) in dst.iter_mut().enumerate() {
                let pos = i as isize - pad as isize;
                if let Some(j) = mode.source_index(pos, len) {
                    *d = src[j];
                }
            }
        });

    Ok(out)
}
