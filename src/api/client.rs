//! 远端 API 客户端
//!
//! 包装对单一 GAS Web App 端点的 GET/POST 调用。操作名走 `fn` 查询参数，
//! 响应统一为 `{ ok, error?, message?, ...payload }` 信封。
//! 此层每次调用恰好一次往返：不重试、不缓存（缓存在明细缓存控制器）。

use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::errors::{ReplyClientError, Result};
use crate::models::Envelope;
use crate::models::admin::responses::{CsvPayload, DetailPayload, EventDetail, Summary, SummaryPayload};
use crate::models::auth::requests::{AdminAuthRequest, StudentAuthRequest};
use crate::models::auth::responses::AuthPayload;
use crate::models::events::entities::Event;
use crate::models::events::responses::{EventPayload, EventsPayload};
use crate::models::replies::entities::ReplyRecord;
use crate::models::replies::requests::{AdminReplyRequest, ReplyRequest};
use crate::models::replies::responses::{LatestPayload, ReplyAck};
use crate::models::roster::entities::RosterRow;
use crate::models::roster::responses::RosterPayload;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ApiClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ReplyClientError::config(format!("invalid api endpoint: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn from_config() -> Result<Self> {
        Self::new(&AppConfig::get().api.endpoint)
    }

    /// 组出带 `fn` 与查询参数的操作 URL
    fn op_url(&self, fn_name: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("fn", fn_name);
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        url
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ReplyClientError::network(format!("HTTP {status}")));
        }
        let body = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body)
            .map_err(|e| ReplyClientError::envelope(e.to_string()))?;
        envelope.into_result()
    }

    async fn get<T: DeserializeOwned>(&self, fn_name: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = self.op_url(fn_name, params);
        tracing::debug!("GET {} ({})", fn_name, url.as_str());
        let response = self.http.get(url).send().await?;
        Self::decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, fn_name: &str, body: &B) -> Result<T> {
        let url = self.op_url(fn_name, &[]);
        tracing::debug!("POST {}", fn_name);
        let response = self.http.post(url).json(body).send().await?;
        Self::decode(response).await
    }

    // ==================== 学生操作 ====================

    pub async fn auth_student(&self, class: &str, name: &str, pin: &str) -> Result<AuthPayload> {
        self.post(
            "auth",
            &StudentAuthRequest {
                class: class.to_string(),
                name: name.to_string(),
                pin: pin.to_string(),
            },
        )
        .await
    }

    pub async fn events(&self) -> Result<Vec<Event>> {
        let payload: EventsPayload = self.get("events", &[]).await?;
        Ok(payload.events)
    }

    pub async fn event(&self, event_id: &str) -> Result<Event> {
        let payload: EventPayload = self.get("event", &[("id", event_id)]).await?;
        Ok(payload.event)
    }

    pub async fn roster(&self) -> Result<Vec<RosterRow>> {
        let payload: RosterPayload = self.get("roster", &[]).await?;
        Ok(payload.roster)
    }

    pub async fn latest_all(&self, class: &str, name: &str) -> Result<Vec<ReplyRecord>> {
        let payload: LatestPayload = self
            .get("latestAll", &[("class", class), ("name", name)])
            .await?;
        Ok(payload.latest)
    }

    pub async fn reply(&self, request: &ReplyRequest) -> Result<ReplyAck> {
        self.post("reply", request).await
    }

    // ==================== 管理者操作 ====================

    pub async fn auth_admin(&self, admin_token: &str) -> Result<AuthPayload> {
        self.post(
            "auth",
            &AdminAuthRequest {
                admin_token: admin_token.to_string(),
            },
        )
        .await
    }

    pub async fn admin_student_latest_all(
        &self,
        admin_token: &str,
        class: &str,
        name: &str,
    ) -> Result<Vec<ReplyRecord>> {
        let payload: LatestPayload = self
            .get(
                "adminStudentLatestAll",
                &[("adminToken", admin_token), ("class", class), ("name", name)],
            )
            .await?;
        Ok(payload.latest)
    }

    pub async fn admin_reply(&self, request: &AdminReplyRequest) -> Result<ReplyAck> {
        self.post("adminReply", request).await
    }

    pub async fn admin_summary(&self, admin_token: &str) -> Result<Summary> {
        let payload: SummaryPayload = self
            .get("adminSummary", &[("adminToken", admin_token)])
            .await?;
        Ok(payload.summary)
    }

    pub async fn admin_event_detail(
        &self,
        admin_token: &str,
        event_id: &str,
    ) -> Result<EventDetail> {
        let payload: DetailPayload = self
            .get(
                "adminEventDetail",
                &[("adminToken", admin_token), ("eventId", event_id)],
            )
            .await?;
        Ok(payload.detail)
    }

    pub async fn admin_export_csv(&self, admin_token: &str, event_id: &str) -> Result<String> {
        let payload: CsvPayload = self
            .get(
                "adminExportCSV",
                &[("adminToken", admin_token), ("eventId", event_id)],
            )
            .await?;
        Ok(payload.csv)
    }
}
