//! Property tests for the simulation engine.
//!
//! Invariants covered:
//! - The live piece never sits outside the board or overlapping it
//!   (a hold swap is checked on the call after it).
//! - Board cell count changes only by a lock (+4) minus cleared rows.
//! - No completed row survives a call.
//! - Piece ids never decrease; the line counter matches the lock events.
//! - Bounding boxes do not depend on position.
//! - `clear_and_shift` keeps every cell outside the cleared rows.

use proptest::prelude::*;

use blockfall::core::{variation_count, Board, EngineConfig, GameState, Outcome, Piece, Randomizer};
use blockfall::types::{GameAction, PieceKind, Pos, PIECE_CELLS};

fn action_strategy() -> impl Strategy<Value = Option<GameAction>> {
    // None stands for a gravity tick.
    prop_oneof![
        Just(None),
        (0..GameAction::ALL.len()).prop_map(|i| Some(GameAction::ALL[i])),
    ]
}

fn assert_live_piece_legal(game: &GameState) {
    let Some(piece) = game.current() else {
        return;
    };
    let board = game.board();
    for pos in piece.absolute_cells() {
        assert!(pos.x >= 0 && pos.x < board.width(), "{:?}", pos);
        assert!(pos.y < board.height(), "{:?}", pos);
        assert!(!board.is_occupied(pos), "{:?} overlaps", pos);
    }
}

proptest! {
    #[test]
    fn generated_rounds_respect_engine_invariants(
        seed in any::<u32>(),
        use_bag7 in any::<bool>(),
        steps in prop::collection::vec(action_strategy(), 1..200),
    ) {
        let randomizer = if use_bag7 { Randomizer::Bag7 } else { Randomizer::Uniform };
        let config = EngineConfig::default().with_randomizer(randomizer);
        let mut game = GameState::with_config(config, seed).unwrap();
        let mut lines = 0u32;

        for step in steps {
            let cells_before = game.board().len();
            let id_before = game.piece_id();
            let was_over = game.game_over();

            let outcome = match step {
                Some(action) => game.apply_action(action),
                None => game.tick(),
            };

            if was_over {
                prop_assert_eq!(&outcome, &Outcome::Ignored);
            }
            match &outcome {
                Outcome::Locked(event) => {
                    lines += event.lines_cleared;
                    let expected =
                        cells_before + PIECE_CELLS - (event.lines_cleared as usize) * 10;
                    prop_assert_eq!(game.board().len(), expected);
                    prop_assert_eq!(event.game_over, game.game_over());
                }
                _ => {
                    prop_assert_eq!(game.board().len(), cells_before);
                }
            }

            prop_assert!(game.piece_id() >= id_before);
            prop_assert_eq!(game.lines(), lines);
            prop_assert!(game.board().full_rows().is_empty());
            // A hold swap is only checked by the next non-hold call.
            let hold_unchecked = outcome == Outcome::Held || step == Some(GameAction::Hold);
            if !hold_unchecked {
                assert_live_piece_legal(&game);
            }
        }
    }

    #[test]
    fn bounding_box_is_translation_invariant(
        kind_idx in 0usize..7,
        rotation in 0usize..4,
        dx in -20i32..20,
        dy in -20i32..20,
    ) {
        let kind = PieceKind::from_index(kind_idx).unwrap();
        let piece = Piece {
            kind,
            x: 3,
            y: 0,
            rotation: rotation % variation_count(kind),
        };
        prop_assert_eq!(piece.bounding_box(), piece.translated(dx, dy).bounding_box());
    }

    #[test]
    fn clear_and_shift_keeps_other_cells(
        cells in prop::collection::btree_set((0i32..10, 0i32..20), 0..120),
        rows in prop::collection::vec(0i32..20, 0..6),
    ) {
        let mut board = Board::new();
        for &(x, y) in &cells {
            board.put(Pos::new(x, y), PieceKind::T);
        }
        let survivors = cells.iter().filter(|(_, y)| !rows.contains(y)).count();

        let mut distinct = rows.clone();
        distinct.sort_unstable();
        distinct.dedup();

        prop_assert_eq!(board.clear_and_shift(&rows), distinct.len());
        prop_assert_eq!(board.len(), survivors);
        for (pos, _) in board.iter() {
            prop_assert!(pos.y >= 0 && pos.y < 20);
        }
    }
}
