pub mod events;
pub mod login;
pub mod open;
pub mod roster;
pub mod submit;

use std::sync::Arc;

use crate::api::ApiClient;
use crate::errors::{ReplyClientError, Result};
use crate::forms::{FormModel, FormRegistry};
use crate::models::replies::responses::ReplyAck;
use crate::models::{Event, Session, SessionKind};
use crate::session::SessionStore;

pub use events::EventWithReply;
pub use open::OpenedForm;

pub struct StudentService {
    api: ApiClient,
    sessions: Arc<dyn SessionStore>,
    registry: FormRegistry,
}

impl StudentService {
    pub fn new(api: ApiClient, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            sessions,
            registry: FormRegistry::new(),
        }
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) fn registry(&self) -> &FormRegistry {
        &self.registry
    }

    pub(crate) async fn current_session(&self) -> Result<Session> {
        self.sessions
            .load(SessionKind::Student)
            .await?
            .ok_or_else(|| ReplyClientError::authentication("no student session"))
    }

    // 登入并保存会话
    pub async fn login(&self, class: &str, name: &str, pin: &str) -> Result<Session> {
        login::handle_login(self, class, name, pin).await
    }

    // 活动列表与个人最新回覆（两路都到齐才返回）
    pub async fn events(&self) -> Result<Vec<EventWithReply>> {
        events::handle_events(self).await
    }

    // 全校名单（登入前可查，不需要会话）
    pub async fn roster(&self) -> Result<Vec<crate::models::RosterRow>> {
        roster::handle_roster(self).await
    }

    // 打开某活动的回条表单
    pub async fn open(&self, event_id: &str) -> Result<OpenedForm> {
        open::handle_open(self, event_id).await
    }

    // 校验并送出回条
    pub async fn submit(&self, event: &Event, model: &FormModel) -> Result<ReplyAck> {
        submit::handle_submit(self, event, model).await
    }

    // 登出：清除学生会话
    pub async fn logout(&self) -> Result<()> {
        self.sessions.clear(SessionKind::Student).await?;
        tracing::info!("Student session cleared");
        Ok(())
    }

    pub(crate) async fn save_session(&self, session: &Session) -> Result<()> {
        self.sessions.save(session).await
    }
}
