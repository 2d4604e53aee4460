use std::collections::HashMap;

use crate::errors::Result;
use crate::models::{Event, ReplyRecord};

use super::StudentService;

/// 活动加上本人最新回覆
#[derive(Debug, Clone)]
pub struct EventWithReply {
    pub event: Event,
    pub latest: Option<ReplyRecord>,
}

/// 并发拉活动列表与最新回覆，两路都成功才组装结果，不渲染半份资料
pub async fn handle_events(service: &StudentService) -> Result<Vec<EventWithReply>> {
    let session = service.current_session().await?;
    let class = session.class.unwrap_or_default();
    let name = session.name.unwrap_or_default();

    let (events, latest) = tokio::join!(
        service.api().events(),
        service.api().latest_all(&class, &name)
    );
    let events = events?;
    let latest = latest?;

    let mut by_event: HashMap<String, ReplyRecord> = latest
        .into_iter()
        .map(|r| (r.event_id.clone(), r))
        .collect();

    Ok(events
        .into_iter()
        .map(|event| {
            let latest = by_event.remove(&event.event_id);
            EventWithReply { event, latest }
        })
        .collect())
}
