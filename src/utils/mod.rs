//! Generic utility primitives with zero domain knowledge.
//!
//! - `command` - Process execution with inherited stdio
//! - `io` - File copying with consistent error handling
//! - `shell` - Shell quoting for displayed command lines

pub mod command;
pub mod io;
pub mod shell;
