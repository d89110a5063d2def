//! Audio Trimming and Splitting Example
//!
//! Trims leading/trailing silence from a synthetic tone and splits a
//! multi-segment signal at its silent gaps. Run with `RUST_LOG=debug` to see
//! the library's own records.

use hush::convert::samples_to_time;
use hush::effects::{TrimConfig, split, trim};
use log::info;
use ndarray::{Array1, Array2};
use std::f32::consts::PI;

fn tone(freq: f32, sr: u32, duration: f32) -> Array1<f32> {
    let n = (sr as f32 * duration) as usize;
    Array1::from_iter((0..n).map(|i| 0.5 * (2.0 * PI * freq * i as f32 / sr as f32).sin()))
}

fn silence(sr: u32, duration: f32) -> Array1<f32> {
    Array1::zeros((sr as f32 * duration) as usize)
}

fn main() -> hush::Result<()> {
    env_logger::init();
    let sr = 22050;

    info!("Trim Silence");
    let mut signal = silence(sr, 1.0).to_vec();
    signal.extend(tone(440.0, sr, 2.0));
    signal.extend(silence(sr, 1.0));
    let signal = Array1::from(signal);
    info!("Original signal: {} samples", signal.len());

    let config = TrimConfig {
        top_db: 20.0,
        ..Default::default()
    };
    let (trimmed, (start, end)) = trim(&signal, &config)?;
    let bounds = samples_to_time(&[start, end], sr);
    info!("Trimmed signal: {} samples", trimmed.len());
    info!("  - Kept: {:.3}s to {:.3}s", bounds[0], bounds[1]);
    info!("  - Removed: {} samples", signal.len() - trimmed.len());

    info!("Split at Silence");
    let mut multi_segment = Vec::new();
    for (i, freq) in [440.0, 554.0, 659.0].into_iter().enumerate() {
        if i > 0 {
            multi_segment.extend(silence(sr, 0.3));
        }
        multi_segment.extend(tone(freq, sr, 0.5));
    }
    let multi_segment = Array1::from(multi_segment);
    info!("Multi-segment signal: {} samples", multi_segment.len());

    let segments = split(&multi_segment, &config)?;
    info!("Split into {} segments:", segments.len());
    for (i, (start, end)) in segments.iter().enumerate() {
        let duration = (end - start) as f32 / sr as f32;
        info!("  Segment {}: samples {}-{} ({:.2} seconds)", i + 1, start, end, duration);
    }

    info!("Stereo");
    let stereo = Array2::from_shape_fn((2, signal.len()), |(c, i)| signal[i] * (1.0 - 0.5 * c as f32));
    let (trimmed, interval) = trim(&stereo, &config)?;
    info!("Stereo trimmed to {:?}, shape {:?}", interval, trimmed.shape());

    Ok(())
}
