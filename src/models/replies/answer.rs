//! 答案负载：按活动类别收敛为带标签联合
//!
//! 后端试算表存的是一格扁平 JSON；客户端以 EventCategory 决定形态，
//! 送出前依对应形态校验必填栏位，而不是逐一探测可选键。

use serde_json::{Map, Value};

use crate::errors::{ReplyClientError, Result};
use crate::models::events::entities::EventCategory;

// 同意 / 不同意
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentChoice {
    Agree,
    Disagree,
}

impl ConsentChoice {
    pub const AGREE: &'static str = "同意";
    pub const DISAGREE: &'static str = "不同意";

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentChoice::Agree => Self::AGREE,
            ConsentChoice::Disagree => Self::DISAGREE,
        }
    }
}

impl std::str::FromStr for ConsentChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            Self::AGREE => Ok(ConsentChoice::Agree),
            Self::DISAGREE => Ok(ConsentChoice::Disagree),
            _ => Err(format!("无效的同意选项: '{s}'")),
        }
    }
}

// 是 / 否（搭乘遊覽車）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusChoice {
    Yes,
    No,
}

impl BusChoice {
    pub const YES: &'static str = "是";
    pub const NO: &'static str = "否";

    pub fn as_str(&self) -> &'static str {
        match self {
            BusChoice::Yes => Self::YES,
            BusChoice::No => Self::NO,
        }
    }
}

impl std::str::FromStr for BusChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            Self::YES => Ok(BusChoice::Yes),
            Self::NO => Ok(BusChoice::No),
            _ => Err(format!("无效的搭车选项: '{s}'")),
        }
    }
}

// 答案负载（按活动类别）
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerPayload {
    /// 一般活动：出席意愿 + 备注
    Plain { attend: String, note: String },
    /// 同意书活动
    Consent {
        consent_choice: ConsentChoice,
        parent_note: String,
        parent_signature: String,
    },
    /// 遊覽車同意书活动
    BusConsent {
        consent_choice: ConsentChoice,
        go_bus: BusChoice,
        back_bus: BusChoice,
        parent_note: String,
        parent_signature: String,
    },
}

impl AnswerPayload {
    /// 展开为后端期望的扁平键值映射
    pub fn to_wire(&self) -> Map<String, Value> {
        let mut map = Map::new();
        match self {
            AnswerPayload::Plain { attend, note } => {
                map.insert("attend".into(), Value::String(attend.clone()));
                map.insert("note".into(), Value::String(note.clone()));
            }
            AnswerPayload::Consent {
                consent_choice,
                parent_note,
                parent_signature,
            } => {
                map.insert(
                    "consentChoice".into(),
                    Value::String(consent_choice.as_str().into()),
                );
                map.insert("parentNote".into(), Value::String(parent_note.clone()));
                map.insert(
                    "parentSignature".into(),
                    Value::String(parent_signature.clone()),
                );
            }
            AnswerPayload::BusConsent {
                consent_choice,
                go_bus,
                back_bus,
                parent_note,
                parent_signature,
            } => {
                map.insert(
                    "consentChoice".into(),
                    Value::String(consent_choice.as_str().into()),
                );
                map.insert("goBus".into(), Value::String(go_bus.as_str().into()));
                map.insert("backBus".into(), Value::String(back_bus.as_str().into()));
                map.insert("parentNote".into(), Value::String(parent_note.clone()));
                map.insert(
                    "parentSignature".into(),
                    Value::String(parent_signature.clone()),
                );
            }
        }
        map
    }

    /// 从扁平映射按活动类别重建；必填键缺失或取值非法时报校验错误
    pub fn from_wire(map: &Map<String, Value>, category: EventCategory) -> Result<Self> {
        let get = |key: &str| -> String {
            map.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let consent = |key: &str| -> Result<ConsentChoice> {
            get(key)
                .parse()
                .map_err(|e: String| ReplyClientError::validation(e))
        };
        let bus = |key: &str| -> Result<BusChoice> {
            get(key)
                .parse()
                .map_err(|e: String| ReplyClientError::validation(e))
        };

        match category {
            EventCategory::Plain => Ok(AnswerPayload::Plain {
                attend: get("attend"),
                note: get("note"),
            }),
            EventCategory::Consent => Ok(AnswerPayload::Consent {
                consent_choice: consent("consentChoice")?,
                parent_note: get("parentNote"),
                parent_signature: get("parentSignature"),
            }),
            EventCategory::BusConsent => Ok(AnswerPayload::BusConsent {
                consent_choice: consent("consentChoice")?,
                go_bus: bus("goBus")?,
                back_bus: bus("backBus")?,
                parent_note: get("parentNote"),
                parent_signature: get("parentSignature"),
            }),
        }
    }

    /// 序列化为单一 JSON 对象字符串，超过字节上限时拒绝送出
    pub fn serialize_checked(&self, max_bytes: usize) -> Result<String> {
        let json = serde_json::to_string(&Value::Object(self.to_wire()))?;
        if json.len() > max_bytes {
            return Err(ReplyClientError::payload_too_large(format!(
                "answer JSON is {} bytes, ceiling is {max_bytes}",
                json.len()
            )));
        }
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_round_trip() {
        let original = AnswerPayload::Plain {
            attend: "會參加".to_string(),
            note: "遲到十分鐘".to_string(),
        };
        let json = original.serialize_checked(48_000).unwrap();
        let map = serde_json::from_str::<Value>(&json)
            .unwrap()
            .as_object()
            .cloned()
            .unwrap();
        let parsed = AnswerPayload::from_wire(&map, EventCategory::Plain).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_bus_consent_round_trip() {
        let original = AnswerPayload::BusConsent {
            consent_choice: ConsentChoice::Agree,
            go_bus: BusChoice::Yes,
            back_bus: BusChoice::No,
            parent_note: "自行接送回程".to_string(),
            parent_signature: "data:image/jpeg;base64,AAAA".to_string(),
        };
        let json = original.serialize_checked(48_000).unwrap();
        let map = serde_json::from_str::<Value>(&json)
            .unwrap()
            .as_object()
            .cloned()
            .unwrap();
        let parsed = AnswerPayload::from_wire(&map, EventCategory::BusConsent).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_missing_consent_choice_is_rejected() {
        let map = Map::new();
        let err = AnswerPayload::from_wire(&map, EventCategory::Consent).unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[test]
    fn test_oversized_payload_is_rejected_before_send() {
        let payload = AnswerPayload::Consent {
            consent_choice: ConsentChoice::Agree,
            parent_note: String::new(),
            parent_signature: "x".repeat(48_000),
        };
        let err = payload.serialize_checked(48_000).unwrap_err();
        assert_eq!(err.code(), "E011");
    }
}
