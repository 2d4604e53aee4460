use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::{Session, SessionKind};
use crate::session::SessionStore;

/// 基于 JSON 文件的会话存储，每个角色槽位一个文件
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn from_config() -> Result<Self> {
        Self::new(&AppConfig::get().session.dir)
    }

    fn slot_path(&self, kind: SessionKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.storage_key()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn save(&self, session: &Session) -> Result<()> {
        let path = self.slot_path(session.kind());
        let body = serde_json::to_string(session)?;
        std::fs::write(&path, body)?;
        debug!("Session saved to slot: {}", session.kind().storage_key());
        Ok(())
    }

    async fn load(&self, kind: SessionKind) -> Result<Option<Session>> {
        let path = self.slot_path(kind);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        // 文件内容损坏时按未登入处理
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(
                    "Discarding corrupted session in slot {}: {}",
                    kind.storage_key(),
                    e
                );
                Ok(None)
            }
        }
    }

    async fn clear(&self, kind: SessionKind) -> Result<()> {
        let path = self.slot_path(kind);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[tokio::test]
    async fn test_save_load_clear_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path()).unwrap();

        let session = Session::student("七甲", "王小明");
        store.save(&session).await.unwrap();

        let loaded = store.load(SessionKind::Student).await.unwrap().unwrap();
        assert_eq!(loaded.role, Role::Student);
        assert_eq!(loaded.class.as_deref(), Some("七甲"));
        assert_eq!(loaded.name.as_deref(), Some("王小明"));

        store.clear(SessionKind::Student).await.unwrap();
        assert!(store.load(SessionKind::Student).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_slots_do_not_overwrite_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path()).unwrap();

        store.save(&Session::student("八乙", "林小華")).await.unwrap();
        store.save(&Session::admin("secret-key")).await.unwrap();

        let student = store.load(SessionKind::Student).await.unwrap().unwrap();
        let admin = store.load(SessionKind::Admin).await.unwrap().unwrap();
        assert_eq!(student.role, Role::Student);
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.admin_token.as_deref(), Some("secret-key"));
    }

    #[tokio::test]
    async fn test_corrupted_slot_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path()).unwrap();

        let path = dir
            .path()
            .join(format!("{}.json", SessionKind::Admin.storage_key()));
        std::fs::write(&path, "{not json").unwrap();

        assert!(store.load(SessionKind::Admin).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_missing_slot_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path()).unwrap();
        assert!(store.clear(SessionKind::Student).await.is_ok());
    }
}
