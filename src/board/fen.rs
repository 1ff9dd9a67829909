use shakmaty::fen::{Fen, ParseFenError};
use shakmaty::{Color, File, Rank, Role, Square};
use thiserror::Error;

use super::{Board, Coord, Piece};

/// Error when loading a custom position.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid FEN: {0}")]
    Fen(#[from] ParseFenError),
    #[error("position has no {0:?} king")]
    MissingKing(Color),
    #[error("position has more than one {0:?} king")]
    DuplicateKing(Color),
}

impl Board {
    /// Parse a FEN string into a board and the side to move.
    ///
    /// Castling and en passant fields are accepted but ignored. Pieces that
    /// are not on their starting square are treated as having moved, so a
    /// pawn off its home rank cannot advance two squares.
    pub fn from_fen(fen: &str) -> Result<(Self, Color), SetupError> {
        let setup = fen.trim().parse::<Fen>()?.into_setup();
        let standard = Board::standard();

        let mut board = Board::empty();
        for (row, rank) in Rank::ALL.iter().rev().enumerate() {
            for (col, file) in File::ALL.into_iter().enumerate() {
                let Some(found) = setup.board.piece_at(Square::from_coords(file, *rank)) else {
                    continue;
                };
                let Some(at) = Coord::new(row as i8, col as i8) else {
                    continue;
                };
                let piece = Piece::new(found.color, found.role);
                let at_home = standard.piece_at(at).map(Piece::view) == Some(found);
                board.put(at, if at_home { piece } else { piece.moved() });
            }
        }

        for color in [Color::White, Color::Black] {
            let kings = board
                .pieces()
                .filter(|(_, piece)| piece.color() == color && piece.role() == Role::King)
                .count();
            match kings {
                0 => return Err(SetupError::MissingKing(color)),
                1 => {}
                _ => return Err(SetupError::DuplicateKing(color)),
            }
        }

        Ok((board, setup.turn))
    }
}
