use thiserror::Error;

/// Map text failed validation.  All variants are fatal at startup.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map is empty")]
    Empty,

    #[error("map row {row} has width {got}, expected {expected}")]
    RaggedRow {
        row:      usize,
        expected: usize,
        got:      usize,
    },

    #[error("unknown tile {ch:?} at row {row}, col {col}")]
    UnknownTile { row: usize, col: usize, ch: char },

    #[error("map has no depot cell")]
    NoDepot,

    #[error("map has more than one depot cell")]
    MultipleDepots,

    #[error("map has no floor cells to spawn items on")]
    NoFloor,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
