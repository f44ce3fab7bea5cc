//! I/O helpers for the scaffolder pipeline.

pub mod config;
pub mod console;
pub mod materialize;
pub mod prompt;
pub mod requester;
