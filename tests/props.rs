use hush::effects::{TrimConfig, trim};
use hush::feature::{RmsConfig, RmsInput, rms};
use hush::frame;
use hush::spectrum::{POWER_AMIN, Reference, power_to_db};
use hush::utils::Reduction;
use ndarray::Array1;
use proptest::prelude::*;

fn burst_signal(prefix: usize, burst: &[f32], suffix: usize) -> Array1<f32> {
    let mut y = vec![0.0f32; prefix];
    y.extend_from_slice(burst);
    y.extend(std::iter::repeat_n(0.0f32, suffix));
    Array1::from(y)
}

proptest! {
    #[test]
    fn frame_elements_alias_source(
        len in 32usize..200,
        frame_length in 1usize..32,
        hop_length in 1usize..16,
    ) {
        let x = Array1::from_iter((0..len).map(|i| i as f32));
        let frames = frame::frame(x.view(), frame_length, hop_length, -1).unwrap();
        prop_assert_eq!(frames.n_frames(), 1 + (len - frame_length) / hop_length);
        for j in 0..frames.n_frames() {
            for i in 0..frame_length {
                prop_assert_eq!(frames.get(&[i, j]), Some(&x[j * hop_length + i]));
            }
        }
        prop_assert!(frames.get(&[0, frames.n_frames()]).is_none());
    }

    #[test]
    fn rms_is_non_negative(
        y in prop::collection::vec(-1.0f32..1.0, 1..300),
        frame_length in 1usize..64,
        hop_length in 1usize..32,
    ) {
        let y = Array1::from(y);
        let cfg = RmsConfig { frame_length, hop_length, ..Default::default() };
        let r = rms(RmsInput::Samples(y.view().into_dyn()), &cfg).unwrap();
        prop_assert!(r.iter().all(|&v| v >= 0.0 && v.is_finite()));
    }

    #[test]
    fn power_to_db_is_monotonic(mut s in prop::collection::vec(0.0f64..1e3, 1..64)) {
        s.sort_by(f64::total_cmp);
        let s = Array1::from(s);
        let db = power_to_db(&s, Reference::Value(1.0), POWER_AMIN, None).unwrap();
        for w in db.windows(2) {
            prop_assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn top_db_clamps_dynamic_range(
        s in prop::collection::vec(0.0f64..1e3, 1..64),
        top_db in 0.0f64..120.0,
    ) {
        let s = Array1::from(s);
        let reference = Reference::Reduce(Reduction::Max);
        let free = power_to_db(&s, reference, POWER_AMIN, None).unwrap();
        let clamped = power_to_db(&s, reference, POWER_AMIN, Some(top_db)).unwrap();

        let max_free = free.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let max_clamped = clamped.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(max_free, max_clamped);
        prop_assert!(clamped.iter().all(|&v| v >= max_clamped - top_db));
        prop_assert!(clamped.iter().zip(free.iter()).all(|(c, f)| c >= f));
    }

    #[test]
    fn trimming_is_idempotent(
        prefix in 0usize..200,
        burst in prop::collection::vec(
            (0.2f32..1.0, any::<bool>()).prop_map(|(m, neg)| if neg { -m } else { m }),
            1..150,
        ),
        suffix in 0usize..200,
        frame_length in 2usize..64,
        hop_divisor in 2usize..8,
    ) {
        let hop_length = (frame_length / hop_divisor).max(1);
        let y = burst_signal(prefix, &burst, suffix);
        let config = TrimConfig { frame_length, hop_length, ..Default::default() };

        let (once, (start, end)) = trim(&y, &config).unwrap();
        // the whole burst survives
        prop_assert!(start <= prefix);
        prop_assert!(end >= prefix + burst.len());

        let once = once.to_owned();
        let (twice, interval) = trim(&once, &config).unwrap();
        prop_assert_eq!(interval, (0, once.len()));
        prop_assert_eq!(twice, once.view());
    }
}
