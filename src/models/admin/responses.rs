use std::collections::HashMap;

use serde::Deserialize;

use crate::models::events::entities::Event;
use crate::models::replies::entities::ReplyRecord;
use crate::models::roster::entities::RosterRow;

// adminSummary 负载
#[derive(Debug, Deserialize)]
pub struct SummaryPayload {
    pub summary: Summary,
}

// 按活动聚合的回覆统计
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default)]
    pub by_event: HashMap<String, SummaryItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryItem {
    #[serde(default)]
    pub event: Option<Event>,
    #[serde(default)]
    pub total_roster: i64,
    #[serde(default)]
    pub replied: i64,
    #[serde(default)]
    pub reply_rate: Option<f64>,
}

// adminEventDetail 负载
#[derive(Debug, Deserialize)]
pub struct DetailPayload {
    pub detail: EventDetail,
}

// 单一活动的完整明细：已回覆名单、未回覆名单与统计
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    pub event: Event,
    #[serde(default)]
    pub replied: Vec<ReplyRecord>,
    #[serde(default)]
    pub not_replied: Vec<RosterRow>,
    #[serde(default)]
    pub total_roster: i64,
    #[serde(default)]
    pub replied_count: i64,
    #[serde(default)]
    pub not_replied_count: i64,
    #[serde(default)]
    pub reply_rate: f64,
}

// adminExportCSV 负载
#[derive(Debug, Deserialize)]
pub struct CsvPayload {
    #[serde(default)]
    pub csv: String,
}
