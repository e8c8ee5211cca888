use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{collides, try_rotate, Board, Piece, Session};
use blockfall::types::{Color, PieceKind};

const GRAY: Color = Color::from_hex(0x808080);

fn bench_tick(c: &mut Criterion) {
    let mut session = Session::new(12345);
    session.start();

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            if session.is_game_over() {
                session.reset();
            }
            session.tick(black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(GRAY));
                }
            }
            black_box(board.clear_full_lines());
        })
    });
}

fn bench_collision_probe(c: &mut Criterion) {
    let mut board = Board::new();
    for x in 0..9 {
        board.set(x, 19, Some(GRAY));
    }
    let piece = Piece::spawn(PieceKind::T).shifted(0, 16);

    c.bench_function("collision_probe", |b| {
        b.iter(|| collides(black_box(&piece), black_box(&board), 0, 1))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let board = Board::new();
    let piece = Piece::spawn(PieceKind::J).shifted(-4, 8);

    c.bench_function("try_rotate_with_kick", |b| {
        b.iter(|| try_rotate(black_box(&piece), black_box(&board)))
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut session = Session::new(12345);
    session.start();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if !session.is_running() {
                session.reset();
            }
            black_box(session.hard_drop());
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_collision_probe,
    bench_rotate,
    bench_hard_drop
);
criterion_main!(benches);
