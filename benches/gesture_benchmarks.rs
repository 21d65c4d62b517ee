//! Benchmarks for gesture classification and stabilization

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hand_gesture_capture::{
    gesture::{FingerBends, Gesture, GestureClassifier},
    landmarks::{HandObservation, Landmark},
    stabilizer::GestureStabilizer,
};

/// Noisy hand with random landmark positions
fn random_hand() -> HandObservation {
    let mut points = [Landmark::default(); 21];
    for point in &mut points {
        *point = Landmark::new(
            rand::random::<f32>() * 1280.0,
            rand::random::<f32>() * 768.0,
            rand::random::<f32>() * 0.1 - 0.05,
        );
    }
    HandObservation::new(points)
}

fn benchmark_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");
    let classifier = GestureClassifier::default();
    let hands: Vec<HandObservation> = (0..100).map(|_| random_hand()).collect();

    group.bench_function("finger_bends", |b| {
        b.iter(|| {
            for hand in &hands {
                black_box(FingerBends::from_hand(black_box(hand)));
            }
        });
    });

    group.bench_function("classify", |b| {
        b.iter(|| {
            for hand in &hands {
                black_box(classifier.classify(black_box(hand)));
            }
        });
    });

    group.finish();
}

fn benchmark_stabilizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("stabilizer");

    let detections: Vec<Vec<Gesture>> = (0..100)
        .map(|_| match rand::random::<u8>() % 3 {
            0 => vec![Gesture::One],
            1 => vec![Gesture::OkSign],
            _ => Vec::new(),
        })
        .collect();

    for window in [5, 15, 30] {
        group.bench_with_input(BenchmarkId::new("push", window), &window, |b, &window| {
            let mut stabilizer = GestureStabilizer::new(window);
            b.iter(|| {
                for detected in &detections {
                    black_box(stabilizer.push(detected.clone()));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_classification, benchmark_stabilizer);
criterion_main!(benches);
