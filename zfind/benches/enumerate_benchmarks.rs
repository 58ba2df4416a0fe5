use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::{fs, path::Path};
use tempfile::{tempdir, TempDir};
use zfind::{enumerate, enumerate_with, AggregatorStrategy, EnumerateOptions};

/// Tree sizes roughly matching a small crate up to a mid-sized monorepo
const TREE_SIZES: [usize; 4] = [125, 625, 3500, 9000];
const FILES_PER_DIR: usize = 25;

fn create_tree(root: &Path, file_count: usize) -> std::io::Result<()> {
    for i in 0..file_count {
        let dir = root
            .join(format!("pkg_{}", i / (FILES_PER_DIR * 4)))
            .join(format!("mod_{}", i / FILES_PER_DIR));
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("file_{}.rs", i)), "")?;
    }
    // Metadata the walker must skip
    let git = root.join(".git/objects");
    fs::create_dir_all(&git)?;
    for i in 0..50 {
        fs::write(git.join(format!("obj_{}", i)), "")?;
    }
    Ok(())
}

fn prepare_trees() -> Vec<(usize, TempDir)> {
    TREE_SIZES
        .iter()
        .map(|&size| {
            let dir = tempdir().unwrap();
            create_tree(dir.path(), size).unwrap();
            (size, dir)
        })
        .collect()
}

fn bench_strategies(c: &mut Criterion) {
    let trees = prepare_trees();

    let mut group = c.benchmark_group("Enumerate");
    group.sample_size(20);
    for (size, dir) in &trees {
        for strategy in [AggregatorStrategy::Channel, AggregatorStrategy::Lock] {
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), size),
                dir.path(),
                |b, root| b.iter(|| black_box(enumerate(root, strategy).unwrap())),
            );
        }
    }
    group.finish();
}

fn bench_auto(c: &mut Criterion) {
    let trees = prepare_trees();

    let mut group = c.benchmark_group("Auto Strategy");
    group.sample_size(20);
    for (size, dir) in &trees {
        let options = EnumerateOptions::new(dir.path());
        group.bench_with_input(BenchmarkId::from_parameter(size), &options, |b, options| {
            b.iter(|| black_box(enumerate_with(options).unwrap()))
        });
    }
    group.finish();
}

fn bench_channel_capacity(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    create_tree(dir.path(), 3500).unwrap();

    let mut group = c.benchmark_group("Channel Capacity");
    group.sample_size(20);
    for capacity in [16, 256, 1000, 4096] {
        let mut options =
            EnumerateOptions::new(dir.path()).with_strategy(AggregatorStrategy::Channel);
        options.channel_capacity = capacity;
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &options,
            |b, options| b.iter(|| black_box(enumerate_with(options).unwrap())),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_strategies,
    bench_auto,
    bench_channel_capacity
);
criterion_main!(benches);
