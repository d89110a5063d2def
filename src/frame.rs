//! Zero-copy framing of N-dimensional arrays.
//!
//! [`frame`] slices an array into overlapping windows along one axis without
//! copying any element. The result is a [`FrameView`] that borrows the source
//! array: it stores the framing geometry (output shape and element strides)
//! and resolves every access back to the source buffer.
//!
//! The output gains one dimension. Framing along a negative axis (counted
//! from the end, e.g. `-1`) inserts the within-frame axis *before* the
//! framing axis, so a signal of shape `(..., n)` becomes
//! `(..., frame_length, n_frames)`. Framing along a non-negative axis inserts
//! it *after*, so `(n, ...)` framed on axis `0` becomes
//! `(n_frames, frame_length, ...)`.

use crate::utils::frame_count;
use ndarray::{
    ArrayD, ArrayView, ArrayViewD, ArrayViewMut, ArrayViewMutD, Axis, Dimension, IxDyn, Slice,
};

#[derive(Debug, Clone)]
struct Layout {
    axis: usize,
    frame_length: usize,
    hop_length: usize,
    n_frames: usize,
    // position of the frame-index axis in the output
    count_pos: usize,
    // position of the within-frame axis in the output
    within_pos: usize,
    shape: Vec<usize>,
    strides: Vec<isize>,
}

fn normalize_axis(axis: isize, ndim: usize) -> crate::Result<usize> {
    let resolved = if axis < 0 {
        ndim as isize + axis
    } else {
        axis
    };
    if resolved < 0 || resolved >= ndim as isize {
        return Err(crate::Error::InvalidAxis { axis, ndim });
    }
    Ok(resolved as usize)
}

impl Layout {
    fn new(
        shape: &[usize],
        strides: &[isize],
        frame_length: usize,
        hop_length: usize,
        axis: isize,
    ) -> crate::Result<Self> {
        let k = normalize_axis(axis, shape.len())?;
        if frame_length == 0 {
            return Err(crate::Error::InvalidSize {
                name: "frame_length",
                value: 0,
                reason: "must be > 0",
            });
        }
        if shape[k] < frame_length {
            return Err(crate::Error::InputTooShort {
                len: shape[k],
                frame_length,
            });
        }
        if hop_length < 1 {
            return Err(crate::Error::InvalidHopLength { hop_length });
        }

        let n_frames = frame_count(shape[k], frame_length, hop_length);
        let (count_pos, within_pos) = if axis < 0 { (k + 1, k) } else { (k, k + 1) };

        let mut out_shape = shape.to_vec();
        out_shape[k] = n_frames;
        out_shape.insert(within_pos, frame_length);

        let mut out_strides = strides.to_vec();
        out_strides[k] = strides[k] * hop_length as isize;
        out_strides.insert(within_pos, strides[k]);

        Ok(Self {
            axis: k,
            frame_length,
            hop_length,
            n_frames,
            count_pos,
            within_pos,
            shape: out_shape,
            strides: out_strides,
        })
    }

    /// Map an output index to the aliased source index.
    fn source_index(&self, index: &[usize]) -> Option<Vec<usize>> {
        if index.len() != self.shape.len() || index.iter().zip(&self.shape).any(|(i, n)| i >= n) {
            return None;
        }
        Some(self.source_index_unchecked(index))
    }

    fn source_index_unchecked(&self, index: &[usize]) -> Vec<usize> {
        let mut src: Vec<usize> = index
            .iter()
            .enumerate()
            .filter(|(pos, _)| *pos != self.count_pos && *pos != self.within_pos)
            .map(|(_, &i)| i)
            .collect();
        src.insert(
            self.axis,
            index[self.count_pos] * self.hop_length + index[self.within_pos],
        );
        src
    }

    fn frame_slice(&self, j: usize) -> Option<Slice> {
        (j < self.n_frames).then(|| self.frame_slice_unchecked(j))
    }

    fn frame_slice_unchecked(&self, j: usize) -> Slice {
        let start = j * self.hop_length;
        Slice::from(start..start + self.frame_length)
    }
}

/// Read-only framed view of an array. See the [module docs](self).
#[derive(Debug, Clone)]
pub struct FrameView<'a, A> {
    base: ArrayViewD<'a, A>,
    layout: Layout,
}

/// Writable framed view. Writes go straight to the source buffer, so
/// overlapping frames observe each other's writes.
#[derive(Debug)]
pub struct FrameViewMut<'a, A> {
    base: ArrayViewMutD<'a, A>,
    layout: Layout,
}

/// Slice an array into overlapping frames without copying.
///
/// Produces `floor((n - frame_length) / hop_length) + 1` frames, where `n` is
/// the length of `axis`. Frame `j` is the contiguous slice
/// `x[.., j * hop_length .. j * hop_length + frame_length, ..]` along `axis`.
///
/// # Errors
/// - [`Error::InputTooShort`](crate::Error::InputTooShort) if `n < frame_length`
/// - [`Error::InvalidHopLength`](crate::Error::InvalidHopLength) if `hop_length < 1`
/// - [`Error::InvalidAxis`](crate::Error::InvalidAxis) if `axis` does not exist
///
/// # Example
/// ```
/// use hush::frame::frame;
/// use ndarray::array;
///
/// let x = array![0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let frames = frame(x.view(), 3, 2, -1).unwrap();
/// assert_eq!(frames.shape(), &[3, 3]);
/// // Column 1 is [2, 3, 4]
/// assert_eq!(frames.get(&[0, 1]), Some(&2.0));
/// assert_eq!(frames.get(&[2, 1]), Some(&4.0));
/// ```
pub fn frame<'a, A, D: Dimension>(
    x: ArrayView<'a, A, D>,
    frame_length: usize,
    hop_length: usize,
    axis: isize,
) -> crate::Result<FrameView<'a, A>> {
    let base = x.into_dyn();
    let layout = Layout::new(base.shape(), base.strides(), frame_length, hop_length, axis)?;
    Ok(FrameView { base, layout })
}

/// Writable counterpart of [`frame`].
pub fn frame_mut<'a, A, D: Dimension>(
    x: ArrayViewMut<'a, A, D>,
    frame_length: usize,
    hop_length: usize,
    axis: isize,
) -> crate::Result<FrameViewMut<'a, A>> {
    let base = x.into_dyn();
    let layout = Layout::new(base.shape(), base.strides(), frame_length, hop_length, axis)?;
    Ok(FrameViewMut { base, layout })
}

impl<'a, A> FrameView<'a, A> {
    pub fn shape(&self) -> &[usize] {
        &self.layout.shape
    }

    /// Element strides of the framed layout, relative to the source buffer.
    pub fn strides(&self) -> &[isize] {
        &self.layout.strides
    }

    pub fn ndim(&self) -> usize {
        self.layout.shape.len()
    }

    pub fn n_frames(&self) -> usize {
        self.layout.n_frames
    }

    pub fn frame_length(&self) -> usize {
        self.layout.frame_length
    }

    pub fn hop_length(&self) -> usize {
        self.layout.hop_length
    }

    /// Bounds-checked element access using an index into the framed shape.
    pub fn get(&self, index: &[usize]) -> Option<&A> {
        let src = self.layout.source_index(index)?;
        self.base.get(src.as_slice())
    }

    /// Frame `j` as a view of the source, with the framing axis cut down to
    /// `frame_length` samples.
    pub fn frame(&self, j: usize) -> Option<ArrayViewD<'a, A>> {
        let slice = self.layout.frame_slice(j)?;
        Some(self.slice_frame(slice))
    }

    /// Iterate over all frames in order.
    pub fn frames(&self) -> impl ExactSizeIterator<Item = ArrayViewD<'a, A>> + '_ {
        (0..self.layout.n_frames).map(move |j| self.slice_frame(self.layout.frame_slice_unchecked(j)))
    }

    fn slice_frame(&self, slice: Slice) -> ArrayViewD<'a, A> {
        let mut view = self.base.clone();
        view.slice_axis_inplace(Axis(self.layout.axis), slice);
        view
    }

    /// Copy the framed layout into a new owned array.
    pub fn to_array(&self) -> ArrayD<A>
    where
        A: Clone,
    {
        ArrayD::from_shape_fn(IxDyn(&self.layout.shape), |idx| {
            let src = self.layout.source_index_unchecked(idx.slice());
            self.base[src.as_slice()].clone()
        })
    }
}

impl<'a, A> FrameViewMut<'a, A> {
    pub fn shape(&self) -> &[usize] {
        &self.layout.shape
    }

    pub fn strides(&self) -> &[isize] {
        &self.layout.strides
    }

    pub fn n_frames(&self) -> usize {
        self.layout.n_frames
    }

    pub fn frame_length(&self) -> usize {
        self.layout.frame_length
    }

    pub fn get(&self, index: &[usize]) -> Option<&A> {
        let src = self.layout.source_index(index)?;
        self.base.get(src.as_slice())
    }

    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut A> {
        let src = self.layout.source_index(index)?;
        self.base.get_mut(src.as_slice())
    }

    pub fn frame(&self, j: usize) -> Option<ArrayViewD<'_, A>> {
        let slice = self.layout.frame_slice(j)?;
        Some(self.base.slice_axis(Axis(self.layout.axis), slice))
    }

    /// Mutable access to frame `j`. Only one frame can be borrowed at a time.
    pub fn frame_mut(&mut self, j: usize) -> Option<ArrayViewMutD<'_, A>> {
        let slice = self.layout.frame_slice(j)?;
        Some(self.base.slice_axis_mut(Axis(self.layout.axis), slice))
    }
}
