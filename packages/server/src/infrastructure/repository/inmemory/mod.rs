//! InMemory Repository 実装
//!
//! 各テーブルは独自の `tokio::sync::Mutex` で保護されます。
//! 1 回の操作は 1 回のロック取得の中で完結し、I/O を挟みません。

mod message;
mod name;
mod presence;
mod watermark;

pub use message::InMemoryMessageRepository;
pub use name::InMemoryNameRepository;
pub use presence::InMemoryPresenceRepository;
pub use watermark::InMemoryWatermarkRepository;
