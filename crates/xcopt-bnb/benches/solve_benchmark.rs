// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{criterion_group, criterion_main, Criterion};
use xcopt_bnb::{solve, TuningOptions};
use xcopt_model::{FilteredTrack, TrackBuilder};
use xcopt_rules::ScoringRule;

const KM_LAT: f64 = 1.0 / 111.194926644;

fn zigzag_track(fixes: usize) -> FilteredTrack {
    let mut builder = TrackBuilder::new();
    for i in 0..fixes {
        let east = if i % 2 == 0 { 0.0 } else { 3.0 };
        let wobble = (i % 7) as f64 * 0.9;
        builder.push_fix(
            6.0 + (east + wobble) * KM_LAT,
            45.0 + i as f64 * 0.8 * KM_LAT,
            i as i64 * 1_000,
        );
    }
    builder.build()
}

fn bench_open_distance(c: &mut Criterion) {
    let track = zigzag_track(200);
    let rule = ScoringRule::open_distance("od", "Open distance", 1.0, 2);

    c.bench_function("solve_open_distance_200_fixes", |b| {
        b.iter(|| {
            let iterator = solve(&track, &rule, TuningOptions::default()).unwrap();
            iterator.last().unwrap()
        })
    });
}

criterion_group!(benches, bench_open_distance);
criterion_main!(benches);
