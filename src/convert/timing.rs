/// Offset applied when an FFT window length is given: `n_fft / 2`.
fn fft_offset(n_fft: Option<usize>) -> usize {
    n_fft.map_or(0, |n| n / 2)
}

/// Convert a single frame index to a sample index.
///
/// `sample = frame * hop_length + offset`, where `offset = n_fft / 2` if an
/// FFT window length is supplied (to counteract windowing when the STFT was
/// not centred), else 0.
///
/// # Example
/// ```
/// use hush::convert::frame_to_sample;
///
/// assert_eq!(frame_to_sample(5, 512, None), 2560);
/// assert_eq!(frame_to_sample(5, 512, Some(2048)), 3584);
/// ```
pub fn frame_to_sample(frame: usize, hop_length: usize, n_fft: Option<usize>) -> usize {
    frame * hop_length + fft_offset(n_fft)
}

/// Convert frame indices to sample indices.
///
/// # Arguments
/// * `frames` - Frame indices
/// * `hop_length` - Number of samples between successive frames
/// * `n_fft` - Optional FFT window length; adds an offset of `n_fft / 2`
///
/// # Example
/// ```
/// use hush::convert::frames_to_samples;
///
/// assert_eq!(frames_to_samples(&[0, 1, 5], 512, None), vec![0, 512, 2560]);
/// ```
pub fn frames_to_samples(frames: &[usize], hop_length: usize, n_fft: Option<usize>) -> Vec<usize> {
    frames
        .iter()
        .map(|&f| frame_to_sample(f, hop_length, n_fft))
        .collect()
}

/// Convert sample indices to frame indices.
///
/// `frame = floor((sample - offset) / hop_length)`; samples that fall before
/// the offset map to frame 0.
///
/// # Errors
/// [`Error::InvalidHopLength`](crate::Error::InvalidHopLength) if `hop_length == 0`.
pub fn samples_to_frames(
    samples: &[usize],
    hop_length: usize,
    n_fft: Option<usize>,
) -> crate::Result<Vec<usize>> {
    if hop_length == 0 {
        return Err(crate::Error::InvalidHopLength { hop_length });
    }
    let offset = fft_offset(n_fft);
    Ok(samples
        .iter()
        .map(|&s| s.saturating_sub(offset) / hop_length)
        .collect())
}

/// Convert frame indices to time (seconds).
pub fn frames_to_time(frames: &[usize], sr: u32, hop_length: usize, n_fft: Option<usize>) -> Vec<f32> {
    let samples = frames_to_samples(frames, hop_length, n_fft);
    samples_to_time(&samples, sr)
}

/// Convert samples to time (seconds).
pub fn samples_to_time(samples: &[usize], sr: u32) -> Vec<f32> {
    samples.iter().map(|&s| s as f32 / sr as f32).collect()
}
