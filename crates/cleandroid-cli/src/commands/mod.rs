//! Command handlers, one module per concern.

pub mod completions;
pub mod config;
pub mod generate;
