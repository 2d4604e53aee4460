use std::collections::HashMap;

/// 字段种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Radio,
    Checkbox,
    Text,
    Textarea,
    Signature,
    /// 纯展示的说明段落，不收集输入
    Textblock,
}

/// 单一字段的声明
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub id: String,
    pub kind: FieldKind,
    pub label: Option<String>,
    pub options: Vec<String>,
    pub placeholder: Option<String>,
    /// Textblock 的段落内文
    pub text: Option<String>,
}

impl FieldDef {
    fn new(id: &str, kind: FieldKind) -> Self {
        Self {
            id: id.to_string(),
            kind,
            label: None,
            options: Vec::new(),
            placeholder: None,
            text: None,
        }
    }

    pub fn radio(id: &str, label: &str, options: &[&str]) -> Self {
        Self {
            label: Some(label.to_string()),
            options: options.iter().map(|s| s.to_string()).collect(),
            ..Self::new(id, FieldKind::Radio)
        }
    }

    pub fn checkbox(id: &str, label: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            ..Self::new(id, FieldKind::Checkbox)
        }
    }

    pub fn text(id: &str, label: &str, placeholder: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            placeholder: Some(placeholder.to_string()),
            ..Self::new(id, FieldKind::Text)
        }
    }

    pub fn textarea(id: &str, label: &str, placeholder: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            placeholder: Some(placeholder.to_string()),
            ..Self::new(id, FieldKind::Textarea)
        }
    }

    pub fn signature(id: &str, label: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            ..Self::new(id, FieldKind::Signature)
        }
    }

    pub fn textblock(id: &str, text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::new(id, FieldKind::Textblock)
        }
    }
}

/// 一份表单的声明：标题加字段列表
#[derive(Debug, Clone)]
pub struct FormDefinition {
    pub title: String,
    pub fields: Vec<FieldDef>,
}

impl FormDefinition {
    /// 默认回条：出席意愿 + 备注
    pub fn default_reply() -> Self {
        Self {
            title: "活動回條".to_string(),
            fields: vec![
                FieldDef::radio("attend", "是否參加本次活動？", &["會參加", "不克前往"]),
                FieldDef::textarea(
                    "note",
                    "備註（可不填）",
                    "如有特殊情況或家長留言，請在此說明",
                ),
            ],
        }
    }

    /// 同意书活动的一般段只保留说明段落
    pub fn info_only(&self) -> Vec<FieldDef> {
        self.fields
            .iter()
            .filter(|f| f.kind == FieldKind::Textblock)
            .cloned()
            .collect()
    }
}

/// 表单注册表：按 eventId 查专属表单，查不到退回默认
#[derive(Debug, Clone)]
pub struct FormRegistry {
    default: FormDefinition,
    overrides: HashMap<String, FormDefinition>,
}

impl Default for FormRegistry {
    fn default() -> Self {
        Self {
            default: FormDefinition::default_reply(),
            overrides: HashMap::new(),
        }
    }
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, event_id: impl Into<String>, definition: FormDefinition) {
        self.overrides.insert(event_id.into(), definition);
    }

    pub fn get(&self, event_id: &str) -> &FormDefinition {
        self.overrides.get(event_id).unwrap_or(&self.default)
    }
}
