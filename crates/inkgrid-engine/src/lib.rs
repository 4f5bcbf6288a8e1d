pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell ({row}, {col}) is outside the {size}x{size} grid")]
pub struct OutOfBoundsError {
    pub row: usize,
    pub col: usize,
    pub size: usize,
}

/// Reasons a placement intent is rejected.
///
/// A rejected placement never mutates the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum PlacementError {
    #[display("placement requested while the game is not being played")]
    NotPlaying,
    #[display("tray slot {slot} does not exist")]
    SlotOutOfRange { slot: usize },
    #[display("tray slot {slot} is empty")]
    EmptySlot { slot: usize },
    #[display("shape does not fit at ({row}, {col})")]
    InvalidPlacement { row: isize, col: isize },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RestoreError {
    #[display("saved grid is {found}x{found}, expected {expected}x{expected}")]
    GridSizeMismatch { expected: usize, found: usize },
    #[display("saved game with status {status:?} cannot be resumed")]
    NotResumable { status: GameStatus },
}
