//! 会话持久化
//!
//! 学生与管理者的会话各占一个槽位，互不覆盖；同一槽位重复登入则取代旧值。
//! 损坏的会话资料视同未登入，不报错。

use std::sync::Arc;

use crate::errors::Result;
use crate::models::{Session, SessionKind};

mod file_store;
mod memory_store;

pub use file_store::FileSessionStore;
pub use memory_store::MemorySessionStore;

#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    // 保存会话（按角色槽位覆盖）
    async fn save(&self, session: &Session) -> Result<()>;
    // 读取指定槽位的会话；不存在或已损坏返回 None
    async fn load(&self, kind: SessionKind) -> Result<Option<Session>>;
    // 清除指定槽位
    async fn clear(&self, kind: SessionKind) -> Result<()>;
}

pub fn create_session_store() -> Result<Arc<dyn SessionStore>> {
    let store = FileSessionStore::from_config()?;
    Ok(Arc::new(store))
}
