//! Benchmarks for score recalculation and snapshot persistence
//!
//! Run with: cargo bench --bench scoring
//!
//! Every mutation recomputes all totals from the history and rewrites the
//! full snapshot, so these measure the per-operation cost as a game grows.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use marriage_scorepad::codec::{decode_history, encode_history};
use marriage_scorepad::scoring::{column_totals, round_to_step, ScoreInput};
use marriage_scorepad::{MemoryStore, Round, RoundTarget, Scoreboard};
use std::hint::black_box;

/// A plausible game: one player takes the hand, the others pay.
fn game_history(rounds: usize, players: usize) -> Vec<Round> {
    (0..rounds)
        .map(|i| {
            let winner = i % players;
            Round::from_scores((0..players).map(|p| {
                if p == winner {
                    5 * (players as i32 - 1) * ((i % 7) as i32 + 1)
                } else {
                    -5 * ((i % 7) as i32 + 1)
                }
            }))
        })
        .collect()
}

fn bench_column_totals(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_totals");
    for rounds in [10, 100, 1000] {
        let history = game_history(rounds, 4);
        group.throughput(Throughput::Elements(rounds as u64));
        group.bench_with_input(BenchmarkId::new("4_players", rounds), &history, |b, h| {
            b.iter(|| column_totals(black_box(4), black_box(h)));
        });
    }
    group.finish();
}

fn bench_input_coercion(c: &mut Criterion) {
    let inputs = ["12", "-7", "", "  35", "abc", "1e3", "-0"];
    c.bench_function("parse_and_round", |b| {
        b.iter(|| {
            inputs
                .iter()
                .map(|s| round_to_step(ScoreInput::parse(black_box(s)).value(), 5))
                .sum::<i32>()
        });
    });
}

fn bench_history_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("history_codec");
    for rounds in [10, 100, 1000] {
        let history = game_history(rounds, 4);
        let encoded = encode_history(&history).unwrap_or_default();
        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", rounds), &history, |b, h| {
            b.iter(|| encode_history(black_box(h)));
        });
        group.bench_with_input(BenchmarkId::new("decode", rounds), &encoded, |b, e| {
            b.iter(|| decode_history(black_box(e)));
        });
    }
    group.finish();
}

fn bench_record_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_round");
    for rounds in [10, 100, 500] {
        group.bench_with_input(BenchmarkId::new("append", rounds), &rounds, |b, &rounds| {
            b.iter_batched(
                || {
                    let mut board = match Scoreboard::open(MemoryStore::new()) {
                        Ok(board) => board,
                        Err(e) => panic!("open failed: {e}"),
                    };
                    for i in 0..rounds {
                        let winner = i % 3;
                        let values: Vec<Option<i32>> = (0..3)
                            .map(|p| Some(if p == winner { 20 } else { -10 }))
                            .collect();
                        let _ = board.record_round_values(&values, RoundTarget::New);
                    }
                    board
                },
                |mut board| board.record_round(&["15", "-5", "-10"], RoundTarget::New),
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_column_totals,
    bench_input_coercion,
    bench_history_codec,
    bench_record_round
);
criterion_main!(benches);
