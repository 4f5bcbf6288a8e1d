//! Local persistence for the puzzle: the resumable saved game, the high
//! score, lifetime statistics, achievements and the theme preference.
//!
//! Everything is stored as JSON values in a [`KeyValueStore`]. Storage is
//! best-effort: [`GameStore`] logs failures and falls back to defaults, so a
//! broken disk never interrupts a game.

pub use self::{achievements::*, game_store::*, records::*, saved_game::*, store::*};

mod achievements;
mod game_store;
mod records;
mod saved_game;
mod store;
