use tracing::info;

use crate::errors::{ReplyClientError, Result};
use crate::models::replies::requests::AdminReplyRequest;
use crate::models::replies::responses::ReplyAck;

use super::AdminService;

/// 管理者代填回条。answer 必须是 JSON 对象字符串，坏资料在本地挡下。
pub async fn handle_fill(
    service: &AdminService,
    event_id: &str,
    class: &str,
    name: &str,
    answer_json: &str,
) -> Result<ReplyAck> {
    let parsed: serde_json::Value = serde_json::from_str(answer_json)
        .map_err(|e| ReplyClientError::validation(format!("answer 不是合法 JSON：{e}")))?;
    if !parsed.is_object() {
        return Err(ReplyClientError::validation("answer 必须是 JSON 对象"));
    }

    let token = service.admin_token().await?;
    let ack = service
        .api()
        .admin_reply(&AdminReplyRequest {
            event_id: event_id.to_string(),
            class: class.to_string(),
            name: name.to_string(),
            answer: answer_json.to_string(),
            admin_token: token,
        })
        .await?;

    info!("Admin filled reply for {} {} {}", event_id, class, name);
    Ok(ack)
}
