use serde::Deserialize;

use super::entities::Event;

// events 操作负载
#[derive(Debug, Deserialize)]
pub struct EventsPayload {
    #[serde(default)]
    pub events: Vec<Event>,
}

// event（单笔）操作负载
#[derive(Debug, Deserialize)]
pub struct EventPayload {
    pub event: Event,
}
