#![no_main]

use std::collections::HashSet;

use cvm_estimator::DistinctCounter;
use libfuzzer_sys::fuzz_target;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let chunks: Vec<&[u8]> = data.chunks(2).collect();
    let exact = chunks.iter().collect::<HashSet<_>>().len();
    let seed = wyhash(data, 0);

    // capacity covering the whole stream counts exactly
    let summary = DistinctCounter::with_capacity(chunks.len())
        .seed(seed)
        .run(chunks.iter(), chunks.len());
    assert_eq!(summary.estimate, exact);
    assert_eq!(summary.eviction_rounds, 0);

    let capacity = seed as usize % chunks.len();
    let summary = DistinctCounter::with_capacity(capacity)
        .seed(seed)
        .run(chunks.iter(), chunks.len());
    assert!(summary.retained <= capacity);
    assert_eq!(summary.elements, chunks.len());
    assert_eq!(
        summary.keep_probability,
        0.5f64.powi(summary.eviction_rounds as i32)
    );
});
