// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0


use criterion::{criterion_group, criterion_main};
use ordered_merge_bench::bench_ordered_merge;

criterion_group!(merge_benches, bench_ordered_merge);
criterion_main!(merge_benches);
