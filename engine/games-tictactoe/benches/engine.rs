use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use engine_core::GameModel;
use games_tictactoe::{State, TicTacToe};

fn bench_legal_actions(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_legal_actions");
    let game = TicTacToe::new();

    group.bench_function("opening", |b| {
        let state = game.initial_state();
        b.iter(|| black_box(game.legal_actions(&state)));
    });

    group.bench_function("midgame", |b| {
        let state = State::from_moves(&[4, 0, 8, 2]).unwrap();
        b.iter(|| black_box(game.legal_actions(&state)));
    });

    group.finish();
}

fn bench_next_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_next_state");
    let game = TicTacToe::new();

    group.bench_function("center", |b| {
        let base_state = game.initial_state();
        b.iter_batched(
            || base_state,
            |state| black_box(game.next_state(&state, 4).unwrap()),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("winning_move", |b| {
        let base_state = State::from_moves(&[0, 3, 1, 4]).unwrap();
        b.iter_batched(
            || base_state,
            |state| black_box(game.next_state(&state, 2).unwrap()),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_win_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_win_values");
    let game = TicTacToe::new();
    let state = State::from_moves(&[0, 3, 1, 4, 2]).unwrap();

    group.bench_function("x_wins", |b| {
        b.iter(|| black_box(game.win_values(&state).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_legal_actions,
    bench_next_state,
    bench_win_values
);
criterion_main!(benches);
