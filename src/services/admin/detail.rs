use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::api::ApiClient;
use crate::cache::{CacheOptions, DetailFetcher};
use crate::errors::{ReplyClientError, Result};
use crate::models::SessionKind;
use crate::models::admin::responses::EventDetail;
use crate::session::SessionStore;

use super::AdminService;

/// 明细缓存的远端抓取实现：每次抓取时从会话取金钥
pub struct AdminDetailFetcher {
    api: ApiClient,
    sessions: Arc<dyn SessionStore>,
}

impl AdminDetailFetcher {
    pub fn new(api: ApiClient, sessions: Arc<dyn SessionStore>) -> Self {
        Self { api, sessions }
    }
}

#[async_trait]
impl DetailFetcher for AdminDetailFetcher {
    async fn fetch_detail(&self, event_id: &str) -> Result<EventDetail> {
        let token = self
            .sessions
            .load(SessionKind::Admin)
            .await?
            .and_then(|s| s.admin_token)
            .ok_or_else(|| ReplyClientError::authentication("no admin session"))?;
        self.api.admin_event_detail(&token, event_id).await
    }
}

/// 「查看結果」：世代戳在发请求前领取，响应落地前校验。
/// 用户在等待期间又点了别的活动时，旧响应直接作废，不盖新表。
pub async fn handle_view_results(
    service: &AdminService,
    event_id: &str,
    force: bool,
) -> Result<Option<Arc<EventDetail>>> {
    service.admin_token().await?;

    let generation = service.generation().begin();
    let options = if force {
        CacheOptions::force()
    } else {
        CacheOptions::default()
    };

    let detail = service.cache().get(event_id, options).await?;

    if !service.generation().is_current(generation) {
        debug!("Discarding stale detail response for {}", event_id);
        return Ok(None);
    }
    Ok(Some(detail))
}
