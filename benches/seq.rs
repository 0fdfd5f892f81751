use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stamplist::{ArraySeq, LinkedSeq};
use std::iter::FromIterator;

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    for n in [100usize, 10_000] {
        group.bench_with_input(BenchmarkId::new("array", n), &n, |b, &n| {
            b.iter(|| {
                let mut seq = ArraySeq::new();
                for i in 0..n {
                    seq.push(black_box(i)).unwrap();
                }
                seq
            })
        });
        group.bench_with_input(BenchmarkId::new("linked", n), &n, |b, &n| {
            b.iter(|| {
                let mut seq = LinkedSeq::new();
                for i in 0..n {
                    seq.push_back(black_box(i));
                }
                seq
            })
        });
    }
    group.finish();
}

fn bench_front_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("front_insert");
    let n = 1000usize;
    group.bench_function("array", |b| {
        b.iter(|| {
            let mut seq = ArraySeq::new();
            for i in 0..n {
                seq.insert(0, black_box(i)).unwrap();
            }
            seq
        })
    });
    group.bench_function("linked", |b| {
        b.iter(|| {
            let mut seq = LinkedSeq::new();
            for i in 0..n {
                seq.push_front(black_box(i));
            }
            seq
        })
    });
    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let n = 10_000usize;
    let array = ArraySeq::from_iter(0..n);
    let linked = LinkedSeq::from_iter(0..n);

    let mut group = c.benchmark_group("traversal");
    group.bench_function("array_iter", |b| {
        b.iter(|| array.iter().sum::<usize>())
    });
    group.bench_function("array_cursor", |b| {
        b.iter(|| {
            let mut cursor = array.cursor();
            let mut sum = 0;
            while let Some(v) = cursor.next(&array).unwrap() {
                sum += *v;
            }
            sum
        })
    });
    group.bench_function("array_range_for_each", |b| {
        b.iter(|| {
            let mut range = array.range();
            let mut sum = 0;
            range.for_each(&array, |v| sum += *v).unwrap();
            sum
        })
    });
    group.bench_function("linked_iter", |b| {
        b.iter(|| linked.iter().sum::<usize>())
    });
    group.bench_function("linked_cursor", |b| {
        b.iter(|| {
            let mut cursor = linked.cursor();
            let mut sum = 0;
            while let Some(v) = cursor.next(&linked).unwrap() {
                sum += *v;
            }
            sum
        })
    });
    group.finish();
}

fn bench_split(c: &mut Criterion) {
    let n = 100_000usize;
    let array = ArraySeq::from_iter(0..n);
    let linked = LinkedSeq::from_iter(0..n);

    let mut group = c.benchmark_group("split");
    group.bench_function("array_bisect", |b| {
        b.iter(|| {
            let mut upper = array.range();
            let mut sum = 0;
            while let Some(mut lower) = upper.try_split(&array) {
                while let Some(v) = lower.next(&array).unwrap() {
                    sum += *v;
                }
            }
            while let Some(v) = upper.next(&array).unwrap() {
                sum += *v;
            }
            sum
        })
    });
    group.bench_function("linked_batches", |b| {
        b.iter(|| {
            let mut range = linked.range();
            let mut sum = 0;
            while let Some(batch) = range.try_split(&linked).unwrap() {
                sum += batch.sum::<usize>();
            }
            sum
        })
    });
    group.finish();
}

fn bench_remove_if(c: &mut Criterion) {
    c.bench_function("remove_if_10k", |b| {
        b.iter_with_setup(
            || ArraySeq::from_iter(0..10_000),
            |mut seq| {
                seq.remove_if(|n| n % 2 == 0);
                seq
            },
        )
    });
}

criterion_group!(
    benches,
    bench_append,
    bench_front_insert,
    bench_traversal,
    bench_split,
    bench_remove_if
);
criterion_main!(benches);
