//! InMemory Watermark Repository 実装

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Timestamp, UserId, WatermarkRepository, WatermarkTable};

/// インメモリ Watermark Repository 実装
pub struct InMemoryWatermarkRepository {
    table: Mutex<WatermarkTable>,
}

impl InMemoryWatermarkRepository {
    /// 新しい InMemoryWatermarkRepository を作成
    pub fn new(table: WatermarkTable) -> Self {
        Self {
            table: Mutex::new(table),
        }
    }
}

impl Default for InMemoryWatermarkRepository {
    fn default() -> Self {
        Self::new(WatermarkTable::new())
    }
}

#[async_trait]
impl WatermarkRepository for InMemoryWatermarkRepository {
    async fn clear(&self, user_id: UserId, now: Timestamp) -> Timestamp {
        let mut table = self.table.lock().await;
        table.clear(user_id, now)
    }

    async fn watermark_of(&self, user_id: &UserId) -> Timestamp {
        let table = self.table.lock().await;
        table.watermark_of(user_id)
    }
}
