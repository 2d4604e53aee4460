use chrono::Local;
use tracing::info;

use crate::errors::{ReplyClientError, Result};
use crate::forms::{FormLimits, FormModel};
use crate::models::Event;
use crate::models::replies::requests::ReplyRequest;
use crate::models::replies::responses::ReplyAck;

use super::StudentService;

/// 送出回条：本地校验在前，网络调用在后。
/// 截止时间在表单停留期间可能已过，送出前再过一次闸门。
pub async fn handle_submit(
    service: &StudentService,
    event: &Event,
    model: &FormModel,
) -> Result<ReplyAck> {
    let session = service.current_session().await?;

    if !event.accepts_replies(Local::now().naive_local()) {
        return Err(ReplyClientError::validation(
            "已超過回覆截止時間，無法再送出或修改。",
        ));
    }

    let answer = model.submit(&FormLimits::from_config())?;
    let ack = service
        .api()
        .reply(&ReplyRequest {
            event_id: event.event_id.clone(),
            class: session.class.unwrap_or_default(),
            name: session.name.unwrap_or_default(),
            answer,
        })
        .await?;

    info!("Reply submitted for event {}", event.event_id);
    Ok(ack)
}
