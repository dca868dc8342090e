//! # Connect Four
//!
//! Rules engine and turn loop for two-player Connect Four: pieces drop to the
//! lowest free row of a column, and the first player with four in a line
//! (horizontal, vertical or diagonal) wins. A full board with no line is a tie.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, players, session state machine
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types
//! - [`ui`]: Terminal front end

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
