// src/lib.rs

//! Puzzle state engine for the math grid game.
//!
//! A level is a grid of fixed numbers, operator symbols, equals signs and
//! blank target cells. The player drags numbers from a per-level pool into
//! the blanks until every embedded equation balances. This crate owns the
//! data model, the placement rules, equation checking, and the level
//! progression machine that talks to the progress backend. Rendering and
//! drag gestures live in the frontend, which only reads cell projections
//! and sends `place`/`remove` intents.

pub mod board;
pub mod client;
pub mod constants;
pub mod error;
pub mod identity;
pub mod level;
pub mod models;
pub mod progression;
pub mod validator;

// Re-export main types for convenience
pub use board::Board;
pub use client::ApiClient;
pub use error::GameError;
pub use models::{CellKind, CellState, Coord, EquationDetail, Level, Operator, Role};
pub use progression::{Game, Phase};
