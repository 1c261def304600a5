//! Game of Life simulation engine.
//!
//! This crate implements the bounded square grid, the Conway transition rule,
//! termination classification, seed patterns, and the session state a driver
//! keeps between steps.

pub mod grid;
pub mod patterns;
pub mod rules;
pub mod session;

pub use grid::{create_empty_grid, Grid};
pub use patterns::{Pattern, PATTERNS};
pub use rules::{advance, classify, count_neighbors, next_state, step};
pub use session::Session;
