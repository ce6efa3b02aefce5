//! Pure in-memory tables.
//!
//! Each model is plain synchronous state with no locking; the repositories
//! in the infrastructure layer wrap every model in its own mutex so that
//! each operation here runs as one critical section.

mod message_log;
mod name_registry;
mod presence_tracker;
mod watermark_table;

pub use message_log::{DEFAULT_MESSAGE_CAPACITY, MessageLog};
pub use name_registry::NameRegistry;
pub use presence_tracker::{DEFAULT_LIVENESS_WINDOW_MILLIS, PresenceTracker};
pub use watermark_table::WatermarkTable;
