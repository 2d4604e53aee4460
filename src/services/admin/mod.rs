pub mod detail;
pub mod export;
pub mod fill;
pub mod login;
pub mod student_latest;
pub mod summary;

use std::sync::Arc;
use std::time::Duration;

use crate::api::ApiClient;
use crate::cache::DetailCache;
use crate::config::AppConfig;
use crate::errors::{ReplyClientError, Result};
use crate::models::admin::responses::{EventDetail, Summary};
use crate::models::replies::entities::ReplyRecord;
use crate::models::replies::responses::ReplyAck;
use crate::models::{Session, SessionKind};
use crate::session::SessionStore;
use crate::view::ViewGeneration;

pub struct AdminService {
    api: ApiClient,
    sessions: Arc<dyn SessionStore>,
    cache: Arc<DetailCache>,
    generation: ViewGeneration,
}

impl AdminService {
    pub fn new(api: ApiClient, sessions: Arc<dyn SessionStore>) -> Self {
        let fetcher = Arc::new(detail::AdminDetailFetcher::new(
            api.clone(),
            sessions.clone(),
        ));
        let cache = Arc::new(DetailCache::new(
            fetcher,
            Duration::from_secs(AppConfig::get().cache.default_ttl),
        ));
        Self {
            api,
            sessions,
            cache,
            generation: ViewGeneration::new(),
        }
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) fn cache(&self) -> &Arc<DetailCache> {
        &self.cache
    }

    pub(crate) fn generation(&self) -> &ViewGeneration {
        &self.generation
    }

    pub(crate) async fn admin_token(&self) -> Result<String> {
        self.sessions
            .load(SessionKind::Admin)
            .await?
            .and_then(|s| s.admin_token)
            .ok_or_else(|| ReplyClientError::authentication("no admin session"))
    }

    pub(crate) async fn save_session(&self, session: &Session) -> Result<()> {
        self.sessions.save(session).await
    }

    // 管理者登入
    pub async fn login(&self, token: &str) -> Result<Session> {
        login::handle_login(self, token).await
    }

    // 摘要统计，载入后在背景预热明细缓存
    pub async fn summary(&self) -> Result<Summary> {
        summary::handle_summary(self).await
    }

    // 查看单一活动明细（带世代戳；旧响应晚到时返回 None）
    pub async fn view_results(
        &self,
        event_id: &str,
        force: bool,
    ) -> Result<Option<Arc<EventDetail>>> {
        detail::handle_view_results(self, event_id, force).await
    }

    // 查询单一学生的全部最新回覆
    pub async fn student_latest(&self, class: &str, name: &str) -> Result<Vec<ReplyRecord>> {
        student_latest::handle_student_latest(self, class, name).await
    }

    // 代学生填写回条
    pub async fn fill_reply(
        &self,
        event_id: &str,
        class: &str,
        name: &str,
        answer_json: &str,
    ) -> Result<ReplyAck> {
        fill::handle_fill(self, event_id, class, name, answer_json).await
    }

    // 汇出单一活动 CSV 到文件
    pub async fn export(&self, event_id: &str, path: &std::path::Path) -> Result<()> {
        export::handle_export(self, event_id, path).await
    }

    // 登出：清会话与明细缓存
    pub async fn logout(&self) -> Result<()> {
        self.sessions.clear(SessionKind::Admin).await?;
        self.cache.clear();
        tracing::info!("Admin session and detail cache cleared");
        Ok(())
    }
}
