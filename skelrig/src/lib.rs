//! Skelrig library
//!
//! This library exposes the command implementations behind the skelrig CLI.

pub mod cli;
pub mod commands;
pub mod script;
pub mod utils;
