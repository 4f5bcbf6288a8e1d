//! Game rules and state management.
//!
//! This module builds the puzzle's rules on top of the [`core`](crate::core)
//! data structures:
//!
//! - [`placement`] - Legality of placing a shape, and whether any tray shape still fits
//! - [`ClearedLines`] - Full row and column detection, clear scoring, feedback tiers
//! - [`ComboTracker`] - Combo and time-windowed streak counters
//! - [`Tray`] / [`ShapeGenerator`] - The three-slot tray and seeded shape draws
//! - [`GameStats`] - Score and placement counters
//! - [`GameSession`] - The state machine that owns a game
//! - [`HookedSession`] - A session that reports every change to a [`SessionHook`]
//!
//! # Game Flow
//!
//! 1. [`GameSession::start_game`] clears the grid and fills the tray
//! 2. The player places a tray shape with [`GameSession::place_shape`]
//! 3. Full rows and columns are cleared and scored
//! 4. An emptied tray is refilled with three new shapes
//! 5. The game ends when no shape left in the tray fits anywhere

pub use self::{
    combo::*, game_session::*, game_stats::*, line_clear::*, placement::*, session_hook::*,
    shape_generator::*, tray::*,
};

mod combo;
mod game_session;
mod game_stats;
mod line_clear;
pub mod placement;
mod session_hook;
mod shape_generator;
mod tray;
