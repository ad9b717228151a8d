//! Collision and placement: does a piece fit, merge it, rotate it.

use crate::board::Board;
use crate::piece::Piece;

/// True if `piece` with its box's top-left corner at `(x, y)` is a legal
/// position on `board`.
///
/// Side walls and the floor always block. Cells above row 0 skip the
/// occupancy check so a piece may hang off the top while spawning or turning.
pub fn fits(piece: &Piece, x: i32, y: i32, board: &Board) -> bool {
    let (w, h) = (board.width() as i32, board.height() as i32);
    piece.cells().all(|(row, col)| {
        let bx = x + col as i32;
        let by = y + row as i32;
        if bx < 0 || bx >= w || by >= h {
            return false;
        }
        by < 0 || !board.is_occupied(bx as usize, by as usize)
    })
}

/// Merge `piece` at `(x, y)` into the board. The caller has already checked
/// `fits` for this exact position. Cells above the top edge have nowhere to go
/// and are dropped.
pub fn fix(piece: &Piece, x: i32, y: i32, board: &mut Board) {
    for (row, col) in piece.cells() {
        let by = y + row as i32;
        if by < 0 {
            continue;
        }
        board.set_occupied((x + col as i32) as usize, by as usize);
    }
}

/// Quarter turn of the bounding box.
#[inline]
pub fn rotate(piece: &Piece) -> Piece {
    piece.rotated()
}

/// The rotated piece if it fits at the same anchor, otherwise `None`. No kicks.
pub fn try_rotate(piece: &Piece, x: i32, y: i32, board: &Board) -> Option<Piece> {
    let candidate = rotate(piece);
    fits(&candidate, x, y, board).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{PIECE_SIZE, PieceKind};
    use proptest::prelude::*;

    const W: usize = 12;
    const H: usize = 20;

    fn any_kind() -> impl Strategy<Value = PieceKind> {
        (0..PieceKind::ALL.len()).prop_map(|i| PieceKind::ALL[i])
    }

    #[test]
    fn fits_on_empty_board_inside() {
        let board = Board::new(W, H);
        for kind in PieceKind::ALL {
            assert!(fits(&Piece::new(kind), 4, 0, &board), "{:?}", kind);
        }
    }

    #[test]
    fn walls_block() {
        let board = Board::new(W, H);
        let o = Piece::new(PieceKind::O);
        assert!(fits(&o, 0, 0, &board));
        assert!(!fits(&o, -1, 0, &board));
        assert!(fits(&o, W as i32 - 2, 0, &board));
        assert!(!fits(&o, W as i32 - 1, 0, &board));
    }

    #[test]
    fn empty_box_columns_may_hang_off_the_side() {
        // O only uses columns 0..2, so its box can stick out on the right.
        let board = Board::new(W, H);
        let o = Piece::new(PieceKind::O);
        assert!(fits(&o, W as i32 - 2, 5, &board));
        // I uses row 1 only; its box can stick out above and below that row.
        let i = Piece::new(PieceKind::I);
        assert!(fits(&i, 0, H as i32 - 2, &board));
        assert!(!fits(&i, 0, H as i32 - 1, &board));
    }

    #[test]
    fn floor_blocks() {
        let board = Board::new(W, H);
        let o = Piece::new(PieceKind::O);
        assert!(fits(&o, 4, H as i32 - 2, &board));
        assert!(!fits(&o, 4, H as i32 - 1, &board));
    }

    #[test]
    fn stack_blocks() {
        let mut board = Board::new(W, H);
        board.set_occupied(5, 10);
        let o = Piece::new(PieceKind::O);
        assert!(!fits(&o, 4, 9, &board));
        assert!(fits(&o, 4, 8, &board));
        assert!(fits(&o, 6, 9, &board));
    }

    #[test]
    fn above_top_skips_occupancy_but_not_walls() {
        let mut board = Board::new(W, H);
        board.fill_row(0);
        let o = Piece::new(PieceKind::O);
        // Rows -2 and -1 are above the grid; nothing there to collide with.
        assert!(fits(&o, 4, -2, &board));
        assert!(!fits(&o, 4, -1, &board));
        assert!(!fits(&o, -1, -2, &board));
        assert!(!fits(&o, W as i32 - 1, -5, &board));
    }

    #[test]
    fn fix_merges_cells() {
        let mut board = Board::new(W, H);
        let t = Piece::new(PieceKind::T);
        fix(&t, 3, 18, &mut board);
        let mut cells: Vec<_> = board.occupied_cells().collect();
        cells.sort_unstable();
        assert_eq!(cells, vec![(3, 19), (4, 18), (4, 19), (5, 19)]);
    }

    #[test]
    fn fix_drops_cells_above_top() {
        let mut board = Board::new(W, H);
        fix(&Piece::new(PieceKind::O), 0, -1, &mut board);
        assert_eq!(board.occupied_cells().collect::<Vec<_>>(), vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn rotation_rejected_against_wall() {
        let board = Board::new(W, H);
        // Turned I fills column 2 of the box top to bottom.
        let i = Piece::new(PieceKind::I);
        assert!(try_rotate(&i, 0, 0, &board).is_some());
        assert!(try_rotate(&i, 0, H as i32 - 2, &board).is_none());
        assert!(try_rotate(&i, W as i32 - 2, 4, &board).is_none());
    }

    #[test]
    fn rotation_rejected_against_stack() {
        let mut board = Board::new(W, H);
        let t = Piece::new(PieceKind::T);
        // Rotated T wants (2, 2) of its box.
        board.set_occupied(6, 12);
        assert!(fits(&t, 4, 10, &board));
        assert!(try_rotate(&t, 4, 10, &board).is_none());
        assert!(try_rotate(&t, 3, 10, &board).is_some());
    }

    proptest! {
        #[test]
        fn never_fits_outside_walls_or_below_floor(
            kind in any_kind(),
            turns in 0usize..4,
            x in -6i32..(W as i32 + 6),
            y in -6i32..(H as i32 + 6),
        ) {
            let board = Board::new(W, H);
            let mut piece = Piece::new(kind);
            for _ in 0..turns {
                piece = rotate(&piece);
            }
            let outside = piece.cells().any(|(row, col)| {
                let bx = x + col as i32;
                let by = y + row as i32;
                bx < 0 || bx >= W as i32 || by >= H as i32
            });
            if outside {
                prop_assert!(!fits(&piece, x, y, &board));
            } else {
                prop_assert!(fits(&piece, x, y, &board));
            }
        }

        #[test]
        fn four_turns_are_identity(kind in any_kind()) {
            let board = Board::new(W, H);
            let start = Piece::new(kind);
            let anchor = (W as i32 / 2 - PIECE_SIZE as i32 / 2, 8);
            let mut piece = start;
            for _ in 0..4 {
                piece = try_rotate(&piece, anchor.0, anchor.1, &board)
                    .expect("open board accepts every turn");
            }
            prop_assert_eq!(piece, start);
        }
    }
}
