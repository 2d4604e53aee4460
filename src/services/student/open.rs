use chrono::Local;

use crate::config::AppConfig;
use crate::errors::{ReplyClientError, Result};
use crate::forms::FormModel;
use crate::models::Event;

use super::StudentService;

/// 打开表单所需的全部材料
#[derive(Debug)]
pub struct OpenedForm {
    pub event: Event,
    pub model: FormModel,
}

/// 取单一活动并组表单：先过截止闸门，再用既有答案预填
pub async fn handle_open(service: &StudentService, event_id: &str) -> Result<OpenedForm> {
    let session = service.current_session().await?;
    let class = session.class.unwrap_or_default();
    let name = session.name.unwrap_or_default();

    let event = service.api().event(event_id).await?;
    if !event.accepts_replies(Local::now().naive_local()) {
        return Err(ReplyClientError::validation(
            "已超過回覆截止時間，無法再送出或修改。",
        ));
    }

    let latest = service.api().latest_all(&class, &name).await?;
    let existing = latest.iter().find(|r| r.event_id == event.event_id);

    let model = FormModel::build(
        &event,
        service.registry(),
        existing,
        &AppConfig::get().events.bus_trip_event_ids,
    );
    Ok(OpenedForm { event, model })
}
