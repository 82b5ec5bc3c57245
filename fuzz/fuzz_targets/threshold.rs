#![no_main]

use cvm_estimator::{calculate_threshold, Accuracy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 24 {
        return;
    }

    let element_count = u64::from_le_bytes(data[0..8].try_into().unwrap()) as usize;
    let epsilon = f64::from_le_bytes(data[8..16].try_into().unwrap());
    let delta = f64::from_le_bytes(data[16..24].try_into().unwrap());

    let threshold = calculate_threshold(element_count, epsilon, delta);
    assert!(threshold <= element_count);
    assert_eq!(threshold, Accuracy::new(epsilon, delta).threshold(element_count));

    if let Ok(accuracy) = Accuracy::try_new(epsilon, delta) {
        assert_eq!(accuracy.threshold(element_count), threshold);
    }
});
