//! InMemory Name Repository 実装

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DisplayName, NameBinding, NameRegistry, NameRepository, UserId};

/// インメモリ Name Repository 実装
pub struct InMemoryNameRepository {
    registry: Mutex<NameRegistry>,
}

impl InMemoryNameRepository {
    /// 新しい InMemoryNameRepository を作成
    pub fn new(registry: NameRegistry) -> Self {
        Self {
            registry: Mutex::new(registry),
        }
    }
}

impl Default for InMemoryNameRepository {
    fn default() -> Self {
        Self::new(NameRegistry::new())
    }
}

#[async_trait]
impl NameRepository for InMemoryNameRepository {
    async fn resolve(&self, user_id: &UserId, requested: Option<DisplayName>) -> DisplayName {
        let mut registry = self.registry.lock().await;
        registry.resolve(user_id, requested)
    }

    async fn try_set(&self, user_id: UserId, name: DisplayName) -> NameBinding {
        let mut registry = self.registry.lock().await;
        registry.try_set(user_id, name)
    }

    async fn lookup(&self, user_id: &UserId) -> Option<DisplayName> {
        let registry = self.registry.lock().await;
        registry.lookup(user_id)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc};

    use super::*;
    use crate::domain::BindStatus;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_concurrent_first_resolve_has_single_winner() {
        // テスト項目: 同じ userId への同時初回 resolve で全員が同じ名前を観測する
        // given (前提条件):
        let repo = Arc::new(InMemoryNameRepository::default());

        // when (操作): 32 タスクが別々の名前で同時に resolve
        let mut handles = Vec::new();
        for i in 0..32 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.resolve(&user("racer"), Some(name(&format!("name-{i}"))))
                    .await
            }));
        }
        let mut observed = HashSet::new();
        for handle in handles {
            observed.insert(handle.await.unwrap());
        }

        // then (期待する結果): 勝者は 1 つだけで、登録値と一致する
        assert_eq!(observed.len(), 1);
        let bound = repo.lookup(&user("racer")).await.unwrap();
        assert!(observed.contains(&bound));
    }

    #[tokio::test]
    async fn test_concurrent_try_set_has_exactly_one_created() {
        // テスト項目: 同時 try_set で Created になるのはちょうど 1 件
        // given (前提条件):
        let repo = Arc::new(InMemoryNameRepository::default());

        // when (操作):
        let mut handles = Vec::new();
        for i in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.try_set(user("racer"), name(&format!("name-{i}"))).await
            }));
        }
        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        // then (期待する結果):
        let created = results
            .iter()
            .filter(|r| r.status == BindStatus::Created)
            .count();
        assert_eq!(created, 1);
        let names: HashSet<_> = results.iter().map(|r| r.name.clone()).collect();
        assert_eq!(names.len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_does_not_bind() {
        // テスト項目: lookup は登録を行わない
        // given (前提条件):
        let repo = InMemoryNameRepository::default();

        // when (操作):
        let before = repo.lookup(&user("u1")).await;
        let resolved = repo.resolve(&user("u1"), None).await;

        // then (期待する結果):
        assert_eq!(before, None);
        assert_eq!(resolved.as_str(), "Anon-u1");
    }
}
