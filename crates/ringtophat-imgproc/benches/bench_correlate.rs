use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};

use ringtophat_imgproc::{
    filter::{DirectCorrelator, RunningSumCorrelator},
    padding::BoundaryMode,
    tophat::{ring_correlate_with, tophat_correlate_with},
};

fn bench_correlate(c: &mut Criterion) {
    let mut group = c.benchmark_group("Ring Correlate");
    let mut rng = StdRng::seed_from_u64(42);

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        let image = Array2::from_shape_fn((*height, *width), |_| rng.random_range(0.0..10.0f64));

        for (r_in, r_out) in [(2, 4), (5, 10), (10, 20)].iter() {
            group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

            let parameter_string = format!("{}x{}x{}-{}", width, height, r_in, r_out);

            group.bench_with_input(
                BenchmarkId::new("ring_direct", &parameter_string),
                &image,
                |b, i| {
                    let correlator = DirectCorrelator::default();
                    b.iter(|| {
                        black_box(ring_correlate_with(
                            &correlator,
                            i.view(),
                            *r_in,
                            *r_out,
                            BoundaryMode::Constant,
                        ))
                    })
                },
            );

            group.bench_with_input(
                BenchmarkId::new("ring_running_sum", &parameter_string),
                &image,
                |b, i| {
                    let correlator = RunningSumCorrelator::default();
                    b.iter(|| {
                        black_box(ring_correlate_with(
                            &correlator,
                            i.view(),
                            *r_in,
                            *r_out,
                            BoundaryMode::Constant,
                        ))
                    })
                },
            );

            group.bench_with_input(
                BenchmarkId::new("tophat_running_sum", &parameter_string),
                &image,
                |b, i| {
                    let correlator = RunningSumCorrelator::default();
                    b.iter(|| {
                        black_box(tophat_correlate_with(
                            &correlator,
                            i.view(),
                            *r_out,
                            BoundaryMode::Constant,
                        ))
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_correlate);
criterion_main!(benches);
