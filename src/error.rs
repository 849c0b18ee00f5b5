use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside the playable set")]
    InvalidCoords,
    #[error("Board mask rows are ragged or contain unknown characters")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
