//! Criterion setup shared by the placement and session benches.
use std::time::Duration;

use criterion::{Criterion, Throughput};

const SAMPLES: usize = 30;
const WARM_UP: Duration = Duration::from_millis(500);
const MEASUREMENT: Duration = Duration::from_secs(3);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLES)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT)
}

/// Counts candidate attempts or simulated frames; never zero so criterion can report a rate.
pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}
