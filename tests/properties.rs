//! Property tests for the engine invariants.
//!
//! - The collision oracle is deterministic and never mutates its inputs.
//! - Rotation cycles within four turns; O never changes.
//! - The current piece never overlaps settled cells or leaves the well sides.
//! - Score, line total and level never decrease within an episode.

use proptest::prelude::*;

use blockfall::core::{collides, Board, Piece, Session};
use blockfall::types::{Color, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn action_strategy() -> impl Strategy<Value = GameAction> {
    prop::sample::select(vec![
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::Rotate,
    ])
}

fn board_strategy() -> impl Strategy<Value = Board> {
    prop::collection::vec((0..BOARD_WIDTH as i8, 0..BOARD_HEIGHT as i8), 0..60).prop_map(
        |cells| {
            let mut board = Board::new();
            for (x, y) in cells {
                board.set(x, y, Some(Color::from_hex(0x808080)));
            }
            board
        },
    )
}

/// Current piece stays within the side walls and off settled cells.
fn assert_current_legal(session: &Session) {
    if let Some(piece) = session.current() {
        if session.is_game_over() {
            return;
        }
        for (x, y) in piece.board_cells() {
            assert!((0..BOARD_WIDTH as i16).contains(&x));
            assert!(y < BOARD_HEIGHT as i16);
            if y >= 0 {
                assert!(!session.board().is_occupied(x as i8, y as i8));
            }
        }
    }
}

proptest! {
    #[test]
    fn oracle_is_pure_and_deterministic(
        board in board_strategy(),
        kind in kind_strategy(),
        turns in 0usize..4,
        x in -3i8..12,
        y in -4i8..22,
        dx in -2i8..=2,
        dy in -2i8..=2,
    ) {
        let mut piece = Piece::spawn(kind);
        for _ in 0..turns {
            piece = piece.rotated();
        }
        let piece = Piece { x, y, ..piece };
        let board_before = board.clone();

        let first = collides(&piece, &board, dx, dy);
        prop_assert_eq!(collides(&piece, &board, dx, dy), first);
        prop_assert_eq!(&board, &board_before);
        prop_assert_eq!(collides(&piece.shifted(dx, dy), &board, 0, 0), first);
    }

    #[test]
    fn rotation_cycles_in_four_turns(kind in kind_strategy()) {
        let start = Piece::spawn(kind).shape;
        let mut shape = start;
        for _ in 0..4 {
            shape = shape.rotated_cw();
        }
        prop_assert_eq!(shape, start);
        if kind == PieceKind::O {
            prop_assert_eq!(start.rotated_cw(), start);
        }
    }

    #[test]
    fn random_play_keeps_state_consistent(
        seed in any::<u64>(),
        actions in prop::collection::vec((action_strategy(), 0u32..400), 1..200),
    ) {
        let mut session = Session::new(seed);
        session.start();
        let mut last = (session.score(), session.lines(), session.level());

        for (action, elapsed) in actions {
            if session.is_game_over() {
                break;
            }
            session.apply_action(action);
            session.tick(elapsed);
            assert_current_legal(&session);

            let now = (session.score(), session.lines(), session.level());
            prop_assert!(now.0 >= last.0 && now.1 >= last.1 && now.2 >= last.2);
            prop_assert_eq!(session.level(), session.lines() / 10 + 1);
            prop_assert!(session.drop_interval_ms() >= 100);
            last = now;
        }
    }

    #[test]
    fn merge_adds_exactly_the_visible_cells(kind in kind_strategy(), x in 0i8..7, y in -3i8..17) {
        let piece = Piece { x, y, ..Piece::spawn(kind) };
        prop_assume!(!collides(&piece, &Board::new(), 0, 0));
        let mut board = Board::new();
        board.merge(&piece);
        let visible = piece.board_cells().iter().filter(|&&(_, cy)| cy >= 0).count();
        prop_assert_eq!(board.filled_count(), visible);
    }
}
