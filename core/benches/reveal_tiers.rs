use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use minefield_core::*;

fn bench_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal");

    for (name, difficulty) in [
        ("easy", Difficulty::Easy),
        ("normal", Difficulty::Normal),
        ("hard", Difficulty::Hard),
    ] {
        let config = difficulty.config().unwrap();
        let board = Board::new(
            config,
            RandomMinefieldGenerator::new(1).with_start(0, StartCell::AlwaysZero),
        )
        .unwrap();
        group.bench_function(name, |b| {
            b.iter_batched(
                || board.clone(),
                |mut board| black_box(board.reveal(0).unwrap()),
                BatchSize::SmallInput,
            )
        });
    }

    // worst case for the worklist: one cascade over the largest board
    let open = Board::from_layout(MineLayout::from_mine_indices(255, 255, &[]).unwrap());
    group.bench_function("open_255x255", |b| {
        b.iter_batched(
            || open.clone(),
            |mut board| black_box(board.reveal(0).unwrap()),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_reveal);
criterion_main!(benches);
