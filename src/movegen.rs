use crate::board::Board;
use crate::types::{Capture, Color, Piece, Position};

/// Diagonals in canonical order: up-left, up-right, down-left, down-right.
const DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Directions a piece may travel, in canonical order.
pub fn directions(piece: Piece) -> impl Iterator<Item = (i32, i32)> {
    DIRECTIONS
        .into_iter()
        .filter(move |&(dr, _)| piece.king || dr == piece.color.forward())
}

/// Empty cells one diagonal step away that the piece on `from` may move to.
pub fn legal_steps(board: &Board, from: Position) -> Vec<Position> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    directions(piece)
        .filter_map(|(dr, dc)| from.offset(dr, dc))
        .filter(|&to| board.is_empty_at(to))
        .collect()
}

/// Jumps over an adjacent enemy piece onto the empty cell right behind it.
pub fn capture_moves(board: &Board, from: Position) -> Vec<Capture> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    directions(piece)
        .filter_map(|(dr, dc)| {
            let middle = from.offset(dr, dc)?;
            let landing = from.offset(2 * dr, 2 * dc)?;
            let jumped = board.piece_at(middle)?;
            (jumped.color != piece.color && board.is_empty_at(landing))
                .then_some(Capture { landing, middle })
        })
        .collect()
}

pub fn any_capture_available(board: &Board, color: Color) -> bool {
    board
        .pieces(color)
        .any(|(at, _)| !capture_moves(board, at).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::within;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    fn board_with(pieces: &[(Position, Piece)]) -> Board {
        Board::with_pieces(pieces).unwrap()
    }

    fn dark_cells() -> impl Iterator<Item = Position> {
        (0..8u8)
            .flat_map(|row| (0..8u8).map(move |col| pos(row, col)))
            .filter(|p| p.is_dark())
    }

    #[test]
    fn red_man_steps_toward_row_zero_in_canonical_order() {
        let board = board_with(&[(pos(5, 2), Piece::man(Color::Red))]);

        assert_eq!(legal_steps(&board, pos(5, 2)), vec![pos(4, 1), pos(4, 3)]);
    }

    #[test]
    fn black_man_steps_toward_row_seven() {
        let board = board_with(&[(pos(2, 1), Piece::man(Color::Black))]);

        assert_eq!(legal_steps(&board, pos(2, 1)), vec![pos(3, 0), pos(3, 2)]);
    }

    #[test]
    fn king_steps_in_all_four_directions() {
        let board = board_with(&[(pos(3, 2), Piece::king(Color::Black))]);

        assert_eq!(
            legal_steps(&board, pos(3, 2)),
            vec![pos(2, 1), pos(2, 3), pos(4, 1), pos(4, 3)]
        );
    }

    #[test]
    fn empty_cell_has_no_moves() {
        let board = Board::new();

        assert!(legal_steps(&board, pos(4, 3)).is_empty());
        assert!(capture_moves(&board, pos(4, 3)).is_empty());
    }

    #[test]
    fn steps_stop_at_edges_and_occupied_cells() {
        let board = Board::new();

        // (5, 0) only has the up-right diagonal; (6, 1) is boxed in by its own men.
        assert_eq!(legal_steps(&board, pos(5, 0)), vec![pos(4, 1)]);
        assert!(legal_steps(&board, pos(6, 1)).is_empty());
    }

    #[test]
    fn red_captures_adjacent_black_piece() {
        let board = board_with(&[
            (pos(3, 2), Piece::man(Color::Red)),
            (pos(2, 3), Piece::man(Color::Black)),
        ]);

        let expected = Capture {
            landing: pos(1, 4),
            middle: pos(2, 3),
        };
        assert_eq!(capture_moves(&board, pos(3, 2)), vec![expected]);
    }

    #[test]
    fn capture_requires_enemy_middle_and_empty_landing() {
        let board = board_with(&[
            (pos(5, 2), Piece::man(Color::Red)),
            (pos(4, 1), Piece::man(Color::Red)),
            (pos(4, 3), Piece::man(Color::Black)),
            (pos(3, 4), Piece::man(Color::Black)),
        ]);

        assert!(capture_moves(&board, pos(5, 2)).is_empty());
    }

    #[test]
    fn capture_landing_must_be_on_board() {
        let board = board_with(&[
            (pos(1, 2), Piece::man(Color::Red)),
            (pos(0, 1), Piece::man(Color::Black)),
        ]);

        assert!(capture_moves(&board, pos(1, 2)).is_empty());
    }

    #[test]
    fn man_cannot_capture_backwards_but_king_can() {
        let mut board = board_with(&[
            (pos(3, 2), Piece::man(Color::Red)),
            (pos(4, 3), Piece::man(Color::Black)),
        ]);
        assert!(capture_moves(&board, pos(3, 2)).is_empty());

        board.place(pos(3, 2), Piece::king(Color::Red)).unwrap();
        let expected = Capture {
            landing: pos(5, 4),
            middle: pos(4, 3),
        };
        assert_eq!(capture_moves(&board, pos(3, 2)), vec![expected]);
    }

    #[test]
    fn any_capture_available_tracks_per_piece_captures() {
        let board = board_with(&[
            (pos(5, 2), Piece::man(Color::Red)),
            (pos(6, 1), Piece::man(Color::Red)),
            (pos(4, 3), Piece::man(Color::Black)),
        ]);

        assert!(any_capture_available(&board, Color::Red));
        // Black's jump over (5, 2) would land on the occupied (6, 1).
        assert!(!any_capture_available(&board, Color::Black));
        assert!(!any_capture_available(&Board::new(), Color::Red));
    }

    #[test]
    fn generated_targets_stay_on_dark_cells() {
        for from in dark_cells() {
            for color in [Color::Red, Color::Black] {
                for piece in [Piece::man(color), Piece::king(color)] {
                    // Enemies on some diagonals so both steps and jumps are produced.
                    let mut board = board_with(&[(from, piece)]);
                    for (dr, dc) in DIRECTIONS {
                        let Some(middle) = from.offset(dr, dc) else {
                            continue;
                        };
                        if (middle.row + middle.col) % 4 == 1 {
                            board.place(middle, Piece::man(color.opponent())).unwrap();
                        }
                    }

                    let steps = legal_steps(&board, from);
                    let captures = capture_moves(&board, from);
                    let cells = steps
                        .iter()
                        .copied()
                        .chain(captures.iter().flat_map(|c| [c.landing, c.middle]));

                    for to in cells {
                        assert!(to.is_dark(), "{to} from {from} is not dark");
                        assert!(within(to.row as i32, to.col as i32));
                        if piece.king {
                            continue;
                        }
                        match color {
                            Color::Red => assert!(to.row < from.row),
                            Color::Black => assert!(to.row > from.row),
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn king_surrounded_by_enemies_captures_in_every_open_direction() {
        let board = board_with(&[
            (pos(3, 4), Piece::king(Color::Red)),
            (pos(2, 3), Piece::man(Color::Black)),
            (pos(2, 5), Piece::man(Color::Black)),
            (pos(4, 3), Piece::man(Color::Black)),
            (pos(4, 5), Piece::man(Color::Black)),
        ]);

        let landings: Vec<Position> = capture_moves(&board, pos(3, 4))
            .into_iter()
            .map(|c| c.landing)
            .collect();

        assert_eq!(landings, vec![pos(1, 2), pos(1, 6), pos(5, 2), pos(5, 6)]);
    }
}
