use std::collections::HashSet;

use cvm_estimator::{Accuracy, DistinctCounter};
use rand::Rng;

/// Stream sizes are divided by `N` (if defined) to keep runs short.
fn scale() -> usize {
    std::env::var("N")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or(1)
}

/// Uniform values in `[0, max]`, both ends inclusive
fn random_stream(size: usize, max: u64) -> Vec<u64> {
    println!("Data init, random range [0, {})", max);
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen_range(0..=max)).collect()
}

fn report(data: &[u64], estimate: usize) {
    println!("Approximate number of distinct elements: {}", estimate);
    println!("Creating exact set...");
    let exact = data.iter().collect::<HashSet<_>>().len();
    println!("Actual number of distinct elements: {}", exact);
    let diff = estimate.abs_diff(exact);
    let error = if exact == 0 {
        0.0
    } else {
        diff as f64 / exact as f64 * 100.0
    };
    println!("Diff: {}\nError: {}%\n", diff, error);
}

fn run(size: usize, max: u64) {
    let data = random_stream(size, max);
    let accuracy = Accuracy::default();
    println!("Data init done... Counting...");
    let summary = DistinctCounter::with_accuracy(accuracy).run(data.iter(), data.len());
    println!(
        "Calculated threshold given epsilon = {} and delta = {}: {}",
        accuracy.epsilon(),
        accuracy.delta(),
        summary.capacity
    );
    println!("Number of random erasures: {}", summary.eviction_rounds);
    report(&data, summary.estimate);
}

fn run_constrained(size: usize, max: u64, capacity: usize) {
    let data = random_stream(size, max);
    println!(
        "Data init done... Counting with constrained memory to {} elements...",
        capacity
    );
    let summary = DistinctCounter::with_capacity(capacity).run(data.iter(), data.len());
    println!("Really using: {}", summary.capacity);
    println!("Number of random erasures: {}", summary.eviction_rounds);
    report(&data, summary.estimate);
}

fn main() {
    let n = scale();
    let million = 1_000_000 / n;
    let ten_million = 10_000_000 / n;

    run(million, 1_000_000);
    run(ten_million, 1_000_000);
    run_constrained(million, 1_000_000, 1_000);
    run_constrained(ten_million, 10_000_000, 1_000);
    run_constrained(million, 1_000_000, 10_000);
    run_constrained(ten_million, 10_000_000, 10_000);
    run_constrained(ten_million, 1, 10_000);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_stream_includes_max() {
        let data = random_stream(1_000, 1);
        let distinct = data.iter().collect::<HashSet<_>>();
        assert_eq!(distinct, HashSet::from([&0, &1]));
    }
}
