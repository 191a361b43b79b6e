//! Support library for the `interactome` binary.
//!
//! Exposes argument parsing, command execution, and summary rendering so tests
//! can drive the commands without spawning a subprocess.

pub mod cli;
pub mod logging;
