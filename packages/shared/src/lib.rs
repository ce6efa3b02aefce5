//! Shared utilities for the Kairan server and client.
//!
//! - `logger`: tracing subscriber setup
//! - `time`: clock abstraction and display-time formatting

pub mod logger;
pub mod time;
