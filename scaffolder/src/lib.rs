//! Language-model-assisted folder scaffolding.
//!
//! This crate asks a text-generation backend for a folder-structure proposal,
//! lets the user confirm it, and creates the accepted structure on disk. The
//! architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (answer parsing, tree rendering).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, console, HTTP backend,
//!   filesystem). Isolated behind traits to enable scripting in tests.
//!
//! Orchestration modules ([`gate`], [`session`]) coordinate core logic with
//! I/O to implement the interactive flow.

pub mod core;
pub mod gate;
pub mod io;
pub mod logging;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod tree;
