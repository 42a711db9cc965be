use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quad_eval::evaluator::score_image;
use quad_eval::matching::match_detections;
use quad_eval::metrics::{average_precision, box_iou, cumulative_curve};
use quad_eval::types::OrientedBox;

fn square(x: f64, y: f64, side: f64) -> OrientedBox {
    OrientedBox::new([x, y, x + side, y, x + side, y + side, x, y + side])
}

fn scattered_boxes(count: usize, jitter: f64) -> Vec<OrientedBox> {
    (0..count)
        .map(|i| {
            let offset = (i as f64) * 15.0;
            square(offset + jitter, offset + jitter, 12.0)
        })
        .collect()
}

fn bench_polygon_iou(c: &mut Criterion) {
    let a = square(10.0, 10.0, 50.0);
    let b = square(30.0, 30.0, 50.0);

    c.bench_function("polygon_iou_single", |bench| {
        bench.iter(|| box_iou(black_box(&a), black_box(&b)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_detections");

    for size in [10, 50, 100].iter() {
        let gts = scattered_boxes(*size, 0.0);
        let preds = scattered_boxes(*size, 2.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |bench, _| {
            bench.iter(|| match_detections(black_box(&preds), black_box(&gts), 0.5));
        });
    }
    group.finish();
}

fn bench_score_image(c: &mut Criterion) {
    let gts = scattered_boxes(100, 0.0);
    let preds = scattered_boxes(100, 2.0);

    c.bench_function("score_image_100", |bench| {
        bench.iter(|| score_image(black_box(&gts), black_box(&preds), 0.5));
    });
}

fn bench_average_precision(c: &mut Criterion) {
    let flags: Vec<bool> = (0..1000).map(|i| i % 3 != 0).collect();
    let (precision, recall) = cumulative_curve(&flags, 800);

    c.bench_function("average_precision_1000", |bench| {
        bench.iter(|| average_precision(black_box(&precision), black_box(&recall)));
    });
}

criterion_group!(
    benches,
    bench_polygon_iou,
    bench_matching,
    bench_score_image,
    bench_average_precision
);
criterion_main!(benches);
