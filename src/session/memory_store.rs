use async_trait::async_trait;
use dashmap::DashMap;

use crate::errors::Result;
use crate::models::{Session, SessionKind};
use crate::session::SessionStore;

/// 内存会话存储，测试与一次性调用场景使用
#[derive(Default)]
pub struct MemorySessionStore {
    slots: DashMap<&'static str, Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, session: &Session) -> Result<()> {
        self.slots
            .insert(session.kind().storage_key(), session.clone());
        Ok(())
    }

    async fn load(&self, kind: SessionKind) -> Result<Option<Session>> {
        Ok(self
            .slots
            .get(kind.storage_key())
            .map(|s| s.value().clone()))
    }

    async fn clear(&self, kind: SessionKind) -> Result<()> {
        self.slots.remove(kind.storage_key());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replace_same_slot() {
        let store = MemorySessionStore::new();
        store.save(&Session::student("七甲", "王小明")).await.unwrap();
        store.save(&Session::student("九丙", "陳小美")).await.unwrap();

        let loaded = store.load(SessionKind::Student).await.unwrap().unwrap();
        assert_eq!(loaded.class.as_deref(), Some("九丙"));
    }
}
