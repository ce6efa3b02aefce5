//! Terminal client for the Kairan polling chat server.

pub mod api;
mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
