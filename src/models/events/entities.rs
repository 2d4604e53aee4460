use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::utils::datetime::parse_flexible;

// 活动类别，决定回条表单的形态与必填校验
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    /// 一般活动：出席意愿 + 备注
    Plain,
    /// 同意书活动：同意/不同意 + 家长签名
    Consent,
    /// 遊覽車同意书活动：另收去/回程搭车选项
    BusConsent,
}

// 活动实体，由后端 Config 表提供，客户端只读
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    // 唯一键
    pub event_id: String,
    // 活动标题
    #[serde(default)]
    pub title: String,
    // 活动日期（显示用字符串）
    #[serde(default)]
    pub date: Option<String>,
    // 活动开始时间（部分表单用 startAt 取代 date）
    #[serde(default)]
    pub start_at: Option<String>,
    // 地点
    #[serde(default)]
    pub place: Option<String>,
    // 联络人
    #[serde(default)]
    pub contact: Option<String>,
    // 回覆截止时间（日期或日期时间，区域格式）
    #[serde(default)]
    pub deadline: Option<String>,
    // "open" 或其他
    #[serde(default)]
    pub status: Option<String>,
    // 统计说明文字
    #[serde(default)]
    pub stat_description: Option<String>,
    // 活动附件 PDF 连结
    #[serde(default)]
    pub pdf_url: Option<String>,
    // 截止后是否仍允许修改（后端可能回传 bool 或 "true"/"TRUE" 字符串）
    #[serde(default)]
    pub allow_edit: Option<serde_json::Value>,
}

impl Event {
    /// 解析截止时间；格式不合法或未设定时返回 None
    pub fn parsed_deadline(&self) -> Option<NaiveDateTime> {
        self.deadline.as_deref().and_then(parse_flexible)
    }

    /// 截止后是否仍允许修改
    pub fn allows_edit_after_deadline(&self) -> bool {
        match &self.allow_edit {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// 此刻是否还接受回覆（无截止时间或未过期皆可；过期后看 allowEdit）
    pub fn accepts_replies(&self, now: NaiveDateTime) -> bool {
        match self.parsed_deadline() {
            Some(deadline) if now > deadline => self.allows_edit_after_deadline(),
            _ => true,
        }
    }

    /// 同意书活动以 id 后缀约定判定
    pub fn is_consent(&self) -> bool {
        self.event_id.ends_with("-consent")
    }

    /// 遊覽車活动採白名单判定
    pub fn is_bus_trip_in(&self, bus_trip_ids: &[String]) -> bool {
        self.is_consent() && bus_trip_ids.iter().any(|id| id == &self.event_id)
    }

    pub fn is_bus_trip(&self) -> bool {
        self.is_bus_trip_in(&AppConfig::get().events.bus_trip_event_ids)
    }

    pub fn category_in(&self, bus_trip_ids: &[String]) -> EventCategory {
        if self.is_bus_trip_in(bus_trip_ids) {
            EventCategory::BusConsent
        } else if self.is_consent() {
            EventCategory::Consent
        } else {
            EventCategory::Plain
        }
    }

    pub fn category(&self) -> EventCategory {
        self.category_in(&AppConfig::get().events.bus_trip_event_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(id: &str, deadline: Option<&str>) -> Event {
        Event {
            event_id: id.to_string(),
            title: String::new(),
            date: None,
            start_at: None,
            place: None,
            contact: None,
            deadline: deadline.map(str::to_string),
            status: Some("open".to_string()),
            stat_description: None,
            pdf_url: None,
            allow_edit: None,
        }
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_consent_suffix_convention() {
        assert!(event("20260301-consent", None).is_consent());
        assert!(!event("20260301", None).is_consent());
    }

    #[test]
    fn test_bus_trip_allow_list() {
        let ids = vec!["20260301-consent".to_string()];
        assert!(event("20260301-consent", None).is_bus_trip_in(&ids));
        assert!(!event("20260307-consent", None).is_bus_trip_in(&ids));
        // 非同意书活动即使在白名单内也不是遊覽車活动
        assert!(!event("20260301", None).is_bus_trip_in(&vec!["20260301".to_string()]));
    }

    #[test]
    fn test_category() {
        let ids = vec!["20260301-consent".to_string()];
        assert_eq!(
            event("20260301-consent", None).category_in(&ids),
            EventCategory::BusConsent
        );
        assert_eq!(
            event("20250301-consent", None).category_in(&ids),
            EventCategory::Consent
        );
        assert_eq!(event("20250415", None).category_in(&ids), EventCategory::Plain);
    }

    #[test]
    fn test_accepts_replies_before_and_after_deadline() {
        let ev = event("e1", Some("2025-03-01"));
        assert!(ev.accepts_replies(at(2025, 2, 28)));
        assert!(!ev.accepts_replies(at(2025, 3, 2)));
    }

    #[test]
    fn test_unparseable_deadline_keeps_event_open() {
        let ev = event("e1", Some("三月一日"));
        assert!(ev.parsed_deadline().is_none());
        assert!(ev.accepts_replies(at(2099, 1, 1)));
    }

    #[test]
    fn test_allow_edit_reopens_past_deadline() {
        let mut ev = event("e1", Some("2025-03-01"));
        ev.allow_edit = Some(serde_json::Value::String("TRUE".to_string()));
        assert!(ev.accepts_replies(at(2025, 3, 2)));
        ev.allow_edit = Some(serde_json::Value::Bool(false));
        assert!(!ev.accepts_replies(at(2025, 3, 2)));
    }
}
