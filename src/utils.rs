use crate::engine::{Board, Cell, Color, Move, MoveKind, MAX_BOARD_SIZE};
use crate::error::{PuzzleError, Result};

/// Parses an array of string slices into a square `Board`.
///
/// Each string slice represents a row, starting from row 0. The board side is
/// the larger of the number of rows and the longest row; shorter rows and
/// missing rows are filled with empty cells.
///
/// Valid characters are:
/// - 'W': a White piece
/// - 'B': a Black piece
/// - '.': an empty cell
///
/// # Errors
/// `InvalidBoardText` for an empty input or an unrecognized character, and the
/// usual size errors when the board would exceed [`MAX_BOARD_SIZE`].
///
/// # Examples
/// ```
/// use corners_solver::engine::{Cell, Color};
/// use corners_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["W.", ".B"]).unwrap();
/// assert_eq!(board.size(), 2);
/// assert_eq!(board.piece_at(Cell::new(0, 0)), Some(Color::White));
/// assert_eq!(board.piece_at(Cell::new(1, 1)), Some(Color::Black));
///
/// assert!(board_from_str_array(&["WX"]).is_err());
/// ```
pub fn board_from_str_array(rows: &[&str]) -> Result<Board> {
    let widest = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    let size = rows.len().max(widest);
    if size == 0 {
        return Err(PuzzleError::InvalidBoardText {
            message: "no rows given".to_string(),
        });
    }
    if size > MAX_BOARD_SIZE {
        return Err(PuzzleError::BoardTooLarge { size });
    }

    let mut board = Board::new_empty(size)?;
    for (r, row) in rows.iter().enumerate() {
        for (c, symbol) in row.chars().enumerate() {
            let piece = match symbol {
                'W' => Some(Color::White),
                'B' => Some(Color::Black),
                '.' => None,
                _ => {
                    return Err(PuzzleError::InvalidBoardText {
                        message: format!("unrecognized character '{}' in row {} col {}", symbol, r, c),
                    })
                }
            };
            board.set_piece(Cell::new(r, c), piece)?;
        }
    }
    Ok(board)
}

/// Letter-number notation for a cell: column letter, then 1-based row.
///
/// ```
/// use corners_solver::engine::Cell;
/// use corners_solver::utils::cell_notation;
/// assert_eq!(cell_notation(Cell::new(0, 0)), "A1");
/// assert_eq!(cell_notation(Cell::new(7, 2)), "C8");
/// ```
pub fn cell_notation(cell: Cell) -> String {
    format!("{}{}", (b'A' + cell.col as u8) as char, cell.row + 1)
}

/// `W A1-A2` for steps, `B C3:C5` for jump chains.
pub fn format_move(mv: &Move) -> String {
    let separator = match mv.kind {
        MoveKind::Step => '-',
        MoveKind::Jump => ':',
    };
    format!(
        "{} {}{}{}",
        mv.color.to_char(),
        cell_notation(mv.from),
        separator,
        cell_notation(mv.to)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&["WW..", "W...", "...B", "..BB"]).unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.count(Color::White), 3);
        assert_eq!(board.count(Color::Black), 3);
        assert_eq!(board.piece_at(Cell::new(2, 3)), Some(Color::Black));
        assert_eq!(board.piece_at(Cell::new(1, 1)), None);
    }

    #[test]
    fn test_board_from_str_array_invalid_char() {
        let result = board_from_str_array(&["W.X"]);
        match result {
            Err(PuzzleError::InvalidBoardText { message }) => {
                assert!(message.contains("unrecognized character 'X'"))
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_board_from_str_array_with_spaces() {
        assert!(board_from_str_array(&["W B"]).is_err());
    }

    #[test]
    fn test_board_from_str_array_too_large() {
        let wide = "W".repeat(MAX_BOARD_SIZE + 1);
        assert_eq!(
            board_from_str_array(&[wide.as_str()]),
            Err(PuzzleError::BoardTooLarge {
                size: MAX_BOARD_SIZE + 1
            })
        );
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let rows: [&str; 0] = [];
        assert!(board_from_str_array(&rows).is_err());
    }

    #[test]
    fn test_board_from_str_array_pads_to_square() {
        let board = board_from_str_array(&["W..", "B"]).unwrap();
        assert_eq!(board.size(), 3);
        assert_eq!(board.piece_at(Cell::new(1, 0)), Some(Color::Black));
        assert_eq!(board.piece_at(Cell::new(2, 2)), None);

        let tall = board_from_str_array(&["W", ".", "B"]).unwrap();
        assert_eq!(tall.size(), 3);
        assert_eq!(tall.piece_at(Cell::new(2, 0)), Some(Color::Black));
    }

    #[test]
    fn test_format_move() {
        let step = Move {
            color: Color::White,
            from: Cell::new(0, 0),
            to: Cell::new(1, 0),
            kind: MoveKind::Step,
        };
        assert_eq!(format_move(&step), "W A1-A2");

        let jump = Move {
            color: Color::Black,
            from: Cell::new(2, 2),
            to: Cell::new(4, 2),
            kind: MoveKind::Jump,
        };
        assert_eq!(format_move(&jump), "B C3:C5");
    }
}
