//! Log records emitted by the dB converters and the trimmer.

use hush::effects::{TrimConfig, trim};
use hush::spectrum::{AMPLITUDE_AMIN, POWER_AMIN, Reference, amplitude_to_db, power_to_db};
use log::{Level, LevelFilter, Log, Metadata, Record};
use ndarray::{Array1, array};
use num_complex::Complex32;
use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

struct Capture {
    records: Mutex<Vec<(ThreadId, Level, String)>>,
}

impl Log for Capture {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if let Ok(mut records) = self.records.lock() {
            records.push((thread::current().id(), record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    records: Mutex::new(Vec::new()),
};

/// Run `f` and return the records it logged at `level` on this thread.
fn logged<F: FnOnce()>(level: Level, f: F) -> Vec<String> {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&CAPTURE).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });

    let id = thread::current().id();
    let before = CAPTURE.records.lock().unwrap().len();
    f();
    let records = CAPTURE.records.lock().unwrap();
    records[before..]
        .iter()
        .filter(|(tid, lvl, _)| *tid == id && *lvl == level)
        .map(|(_, _, msg)| msg.clone())
        .collect()
}

#[test]
fn complex_power_warns_once() {
    let s = array![Complex32::new(3.0, 4.0), Complex32::new(0.0, 1.0)];
    let warnings = logged(Level::Warn, || {
        power_to_db(&s, Reference::Value(1.0), POWER_AMIN, None).unwrap();
    });
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("phase"));
}

#[test]
fn complex_amplitude_warns_once() {
    let s = array![Complex32::new(3.0, 4.0), Complex32::new(0.0, 1.0)];
    let warnings = logged(Level::Warn, || {
        amplitude_to_db(&s, Reference::Value(1.0), AMPLITUDE_AMIN, Some(80.0)).unwrap();
    });
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("phase"));
}

#[test]
fn real_input_does_not_warn() {
    let s = array![1.0f32, 0.5, 0.0];
    let warnings = logged(Level::Warn, || {
        power_to_db(&s, Reference::Value(1.0), POWER_AMIN, None).unwrap();
        amplitude_to_db(&s, Reference::Value(1.0), AMPLITUDE_AMIN, None).unwrap();
    });
    assert!(warnings.is_empty());
}

#[test]
fn trim_reports_interval_at_debug() {
    let mut y = Array1::<f32>::zeros(1000);
    y.iter_mut().skip(200).take(200).for_each(|v| *v = 1.0);
    let config = TrimConfig {
        frame_length: 100,
        hop_length: 50,
        ..Default::default()
    };

    let mut warnings = Vec::new();
    let debug = logged(Level::Debug, || {
        warnings = logged(Level::Warn, || {
            trim(&y, &config).unwrap();
        });
    });
    assert!(warnings.is_empty());
    assert!(debug.iter().any(|msg| msg.contains("[200, 450)")));
}
