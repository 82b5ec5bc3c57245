#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::collections::HashSet;

use criterion::measurement::WallTime;
use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};
use cvm_estimator::{Accuracy, DistinctCounter};
use pprof::criterion::{Output, PProfProfiler};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tabled::settings::{Settings, Style};
use tabled::{Table, Tabled};

/// Streams are benchmarked with lengths ranging from 1000 to `DEFAULT_MAX_LEN` or environment
/// variable `N` (if defined), multiplied by 10 with every iteration.
const DEFAULT_MAX_LEN: usize = 1_000_000;
/// Fixed sketch capacities benchmarked next to the accuracy-derived one.
const CAPACITIES: [usize; 2] = [1_000, 10_000];

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Protobuf));
    targets = benchmark
}
criterion_main!(benches);

fn benchmark(c: &mut Criterion) {
    let bench_results_path = std::env::var("BENCH_RESULTS_PATH").unwrap();
    let max_len = std::env::var("N")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_LEN);

    let lengths: Vec<usize> = (0..)
        .map(|e| 1_000 * 10usize.pow(e))
        .take_while(|&n| n <= max_len)
        .collect();

    let mut group = c.benchmark_group("count");
    for &len in &lengths {
        let data = random_stream(len, 12345);
        group.throughput(Throughput::Elements(len as u64));
        for budget in budgets() {
            bench_count(&mut group, &data, budget);
        }
    }
    group.finish();

    let results: Vec<StatRecord> = lengths
        .iter()
        .map(|&len| {
            let data = random_stream(len, 12345);
            let exact = data.iter().collect::<HashSet<_>>().len();
            StatRecord {
                stream_len: len,
                distinct: exact,
                accuracy_default: measure_error(&data, exact, Budget::Accuracy),
                capacity_1000: measure_error(&data, exact, Budget::Capacity(CAPACITIES[0])),
                capacity_10000: measure_error(&data, exact, Budget::Capacity(CAPACITIES[1])),
            }
        })
        .collect();

    let table_config = Settings::default().with(Style::markdown());
    std::fs::write(
        format!("{}/relative_error.md", bench_results_path),
        Table::new(results).with(table_config).to_string(),
    )
    .unwrap();

    let results: Vec<StatRecord> = lengths
        .iter()
        .map(|&len| {
            let data = random_stream(len, 12345);
            StatRecord {
                stream_len: len,
                distinct: data.iter().collect::<HashSet<_>>().len(),
                accuracy_default: measure_allocations(&data, Budget::Accuracy),
                capacity_1000: measure_allocations(&data, Budget::Capacity(CAPACITIES[0])),
                capacity_10000: measure_allocations(&data, Budget::Capacity(CAPACITIES[1])),
            }
        })
        .collect();

    let table_config = Settings::default().with(Style::markdown());
    std::fs::write(
        format!("{}/memory_usage.md", bench_results_path),
        Table::new(results).with(table_config).to_string(),
    )
    .unwrap();
}

#[derive(Clone, Copy)]
enum Budget {
    Accuracy,
    Capacity(usize),
}

impl Budget {
    fn counter(self) -> DistinctCounter {
        match self {
            Budget::Accuracy => DistinctCounter::with_accuracy(Accuracy::default()),
            Budget::Capacity(capacity) => DistinctCounter::with_capacity(capacity),
        }
    }

    fn name(self) -> String {
        match self {
            Budget::Accuracy => "accuracy-default".to_string(),
            Budget::Capacity(capacity) => format!("capacity-{}", capacity),
        }
    }
}

fn budgets() -> impl Iterator<Item = Budget> {
    std::iter::once(Budget::Accuracy).chain(CAPACITIES.into_iter().map(Budget::Capacity))
}

fn random_stream(len: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(0..len as u64)).collect()
}

fn bench_count(group: &mut BenchmarkGroup<WallTime>, data: &[u64], budget: Budget) {
    group.bench_with_input(
        BenchmarkId::new(budget.name(), data.len()),
        &data,
        |b, data| {
            b.iter(|| {
                budget
                    .counter()
                    .seed(42)
                    .count(black_box(data.iter()), data.len())
            });
        },
    );
}

fn measure_allocations(data: &[u64], budget: Budget) -> String {
    let _profiler = dhat::Profiler::builder().testing().build();
    let summary = budget.counter().seed(42).run(data.iter(), data.len());
    let stats = dhat::HeapStats::get();
    format!("{} / {} / {}", summary.capacity, stats.max_bytes, stats.total_blocks)
}

fn measure_error(data: &[u64], exact: usize, budget: Budget) -> String {
    let n = 20;
    let mut total_relative_error: f64 = 0.0;
    for seed in 0..n {
        let estimate = budget.counter().seed(seed).count(data.iter(), data.len());
        let relative_error = if exact == 0 {
            0.0
        } else {
            (estimate as f64 - exact as f64).abs() / exact as f64
        };
        total_relative_error += relative_error;
    }
    let avg_relative_error = total_relative_error / (n as f64);

    if avg_relative_error < 1.0 {
        format!("{:.4}", avg_relative_error)
    } else {
        format!("{:.2e}", avg_relative_error)
    }
}

#[derive(Tabled)]
struct StatRecord {
    stream_len: usize,
    distinct: usize,
    accuracy_default: String,
    capacity_1000: String,
    capacity_10000: String,
}
