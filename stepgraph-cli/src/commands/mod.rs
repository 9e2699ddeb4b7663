//! Command implementations for the stepgraph CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod check;
pub mod play;
pub mod run;
