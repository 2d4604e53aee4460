use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::datetime::parse_flexible;

// 一笔「最新回覆」：同一 (eventId, class, name) 只保留最后一次送出的答案
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRecord {
    pub event_id: String,
    pub class: String,
    pub name: String,
    // 不透明的 JSON 编码答案（试算表单格原文）
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub last_reply_ts: Option<String>,
    // 管理明细列才带乐器栏位
    #[serde(default)]
    pub instrument: Option<String>,
}

impl ReplyRecord {
    /// 解析回覆时间；缺失或格式不合法返回 None
    pub fn parsed_ts(&self) -> Option<NaiveDateTime> {
        self.last_reply_ts.as_deref().and_then(parse_flexible)
    }

    /// 宽松解析 answer 字段；非法 JSON 或非对象时视为空映射
    pub fn answer_map(&self) -> Map<String, Value> {
        serde_json::from_str::<Value>(&self.answer)
            .ok()
            .and_then(|v| v.as_object().cloned())
            .unwrap_or_default()
    }

    fn answer_str(&self, key: &str) -> Option<String> {
        self.answer_map()
            .get(key)
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|s| !s.is_empty())
    }

    /// 家长签名 dataURL（兼容旧栏位名 signature）
    pub fn signature_data_url(&self) -> Option<String> {
        self.answer_str("parentSignature")
            .or_else(|| self.answer_str("signature"))
    }

    /// 家长备注
    pub fn parent_note(&self) -> Option<String> {
        self.answer_str("parentNote")
    }

    /// 主要作答：一般活动取 attend，同意书活动取 consentChoice
    pub fn primary_choice(&self) -> Option<String> {
        self.answer_str("attend")
            .or_else(|| self.answer_str("consentChoice"))
    }

    /// 此笔答案是否带遊覽車栏位
    pub fn has_bus_fields(&self) -> bool {
        let map = self.answer_map();
        map.contains_key("goBus") || map.contains_key("backBus")
    }

    pub fn go_bus(&self) -> Option<String> {
        self.answer_str("goBus")
    }

    pub fn back_bus(&self) -> Option<String> {
        self.answer_str("backBus")
    }
}
