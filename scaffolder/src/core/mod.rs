//! Deterministic, pure logic shared by the scaffolder pipeline.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod choice;
pub mod render;
