//! Core data structures for the puzzle.
//!
//! - [`Grid`] - Square cell store that shapes are stamped onto
//! - [`Ink`] / [`Rgb`] - Display payload carried by a filled cell
//! - [`ShapeLayout`] / [`Shape`] - Polyomino layouts and drawn tray shapes
//! - [`Theme`] - Colour and symbol sets used when drawing shapes
//!
//! None of these types know about scoring or game flow; see
//! [`engine`](crate::engine) for that.

pub use self::{grid::*, ink::*, shape::*, theme::*};

pub(crate) mod grid;
pub(crate) mod ink;
pub(crate) mod shape;
pub(crate) mod theme;
