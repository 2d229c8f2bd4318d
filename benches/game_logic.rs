use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tasktris::core::{can_place, Board, Offline, Position, Shape};
use tasktris::engine::{GameSession, SessionConfig, SessionInput, Settings};
use tasktris::types::{Color, PieceKind, COLS};

fn bench_session_step(c: &mut Criterion) {
    let mut session = GameSession::new(Settings::default(), 12345);
    let config = SessionConfig::default();
    let input = SessionInput {
        fast_drop: true,
        ..SessionInput::default()
    };

    c.bench_function("session_step_20ms", |b| {
        b.iter(|| {
            if session.is_game_over() {
                session.request_reset();
            }
            session.step(black_box(input), 20, Some(&config), &mut Offline);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for row in 0..4 {
                for col in 0..COLS as i8 {
                    board.set(col, row, Some(Color::LightBlue));
                }
            }
            board.clear_full_rows();
        })
    });
}

fn bench_can_place(c: &mut Criterion) {
    let mut board = Board::new();
    for col in 0..COLS as i8 - 1 {
        board.set(col, 0, Some(Color::Red));
    }
    let shape = Shape::of(PieceKind::T, 2);

    c.bench_function("can_place", |b| {
        b.iter(|| can_place(black_box(&shape), black_box(Position::new(4, 13)), &board))
    });
}

criterion_group!(benches, bench_session_step, bench_line_clear, bench_can_place);
criterion_main!(benches);
