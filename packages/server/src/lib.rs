//! Polling chat server library.
//!
//! Clients post messages tied to a self-chosen identifier, poll for new
//! messages, clear their personal view, and report presence through
//! heartbeats. All state lives in memory for the lifetime of the process.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
