use crate::config::AppConfig;
use crate::errors::{ReplyClientError, Result};
use crate::forms::definition::{FieldDef, FormRegistry};
use crate::forms::signature::SignatureField;
use crate::models::events::entities::{Event, EventCategory};
use crate::models::replies::answer::{AnswerPayload, BusChoice, ConsentChoice};
use crate::models::replies::entities::ReplyRecord;
use crate::utils::validate::clamp_note;

/// 提交限制，取自配置
#[derive(Debug, Clone, Copy)]
pub struct FormLimits {
    pub max_answer_bytes: usize,
    pub note_max_chars: usize,
}

impl FormLimits {
    pub fn from_config() -> Self {
        let config = AppConfig::get();
        Self {
            max_answer_bytes: config.form.max_answer_bytes,
            note_max_chars: config.form.note_max_chars,
        }
    }
}

/// 编辑中的答案草稿，按活动类别分形态
#[derive(Debug)]
pub enum AnswerDraft {
    Plain {
        /// 出席意愿的可选项（来自字段声明）
        attend_options: Vec<String>,
        attend: Option<String>,
        note: String,
    },
    Consent {
        /// 是否为遊覽車活动，决定去/回程两题是否必填
        include_bus: bool,
        consent_choice: Option<ConsentChoice>,
        go_bus: Option<BusChoice>,
        back_bus: Option<BusChoice>,
        parent_note: String,
        signature: SignatureField,
    },
}

/// 可编辑的表单模型：声明 + 既有答案预填的草稿
#[derive(Debug)]
pub struct FormModel {
    pub title: String,
    pub category: EventCategory,
    /// 渲染用字段声明（同意书活动只保留说明段落）
    pub fields: Vec<FieldDef>,
    pub draft: AnswerDraft,
}

impl FormModel {
    /// 由活动、表单注册表与既有回覆组出表单。
    /// 既有答案取值非法时按未填处理，不阻断开表单。
    pub fn build(
        event: &Event,
        registry: &FormRegistry,
        existing: Option<&ReplyRecord>,
        bus_trip_ids: &[String],
    ) -> Self {
        let definition = registry.get(&event.event_id);
        let category = event.category_in(bus_trip_ids);
        let answer = existing.map(|r| r.answer_map()).unwrap_or_default();
        let answer_str = |key: &str| -> Option<String> {
            answer
                .get(key)
                .and_then(|v| v.as_str().map(str::to_string))
                .filter(|s| !s.is_empty())
        };

        match category {
            EventCategory::Plain => FormModel {
                title: definition.title.clone(),
                category,
                fields: definition.fields.clone(),
                draft: AnswerDraft::Plain {
                    attend_options: definition
                        .fields
                        .iter()
                        .find(|f| f.id == "attend")
                        .map(|f| f.options.clone())
                        .unwrap_or_default(),
                    attend: answer_str("attend"),
                    note: answer_str("note").unwrap_or_default(),
                },
            },
            EventCategory::Consent | EventCategory::BusConsent => FormModel {
                title: definition.title.clone(),
                category,
                fields: definition.info_only(),
                draft: AnswerDraft::Consent {
                    include_bus: category == EventCategory::BusConsent,
                    consent_choice: answer_str("consentChoice").and_then(|s| s.parse().ok()),
                    go_bus: answer_str("goBus").and_then(|s| s.parse().ok()),
                    back_bus: answer_str("backBus").and_then(|s| s.parse().ok()),
                    parent_note: answer_str("parentNote").unwrap_or_default(),
                    signature: SignatureField::from_existing(
                        existing.and_then(|r| r.signature_data_url()),
                    ),
                },
            },
        }
    }

    /// 校验必填并序列化为送出用的 answer JSON。
    /// 任何校验失败都发生在网络调用之前。
    pub fn submit(&self, limits: &FormLimits) -> Result<String> {
        let payload = match &self.draft {
            AnswerDraft::Plain { attend, note, .. } => {
                let attend = attend
                    .clone()
                    .ok_or_else(|| ReplyClientError::validation("請選擇是否參加本次活動"))?;
                AnswerPayload::Plain {
                    attend,
                    note: clamp_note(note, limits.note_max_chars),
                }
            }
            AnswerDraft::Consent {
                include_bus,
                consent_choice,
                go_bus,
                back_bus,
                parent_note,
                signature,
            } => {
                let consent_choice = (*consent_choice)
                    .ok_or_else(|| ReplyClientError::validation("請選擇同意或不同意"))?;
                let parent_signature = signature
                    .data_url()
                    .ok_or_else(|| ReplyClientError::validation("請完成家長簽名"))?
                    .to_string();
                let parent_note = clamp_note(parent_note, limits.note_max_chars);

                if *include_bus {
                    AnswerPayload::BusConsent {
                        consent_choice,
                        go_bus: (*go_bus).ok_or_else(|| {
                            ReplyClientError::validation("請選擇去程是否搭乘遊覽車")
                        })?,
                        back_bus: (*back_bus).ok_or_else(|| {
                            ReplyClientError::validation("請選擇回程是否搭乘遊覽車")
                        })?,
                        parent_note,
                        parent_signature,
                    }
                } else {
                    AnswerPayload::Consent {
                        consent_choice,
                        parent_note,
                        parent_signature,
                    }
                }
            }
        };
        payload.serialize_checked(limits.max_answer_bytes)
    }
}
