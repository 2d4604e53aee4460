use serde::{Deserialize, Serialize};

// 登入身份
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

// 会话槽位：每种身份各存一份
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    Student,
    Admin,
}

impl SessionKind {
    /// 存储键沿用网页版的命名，方便对照后端记录
    pub fn storage_key(&self) -> &'static str {
        match self {
            SessionKind::Student => "renhe_replies_student",
            SessionKind::Admin => "renhe_replies_admin",
        }
    }
}

// 会话内容：登入成功时建立，登出或切换身份时清除
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_token: Option<String>,
}

impl Session {
    pub fn student(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            role: Role::Student,
            class: Some(class.into()),
            name: Some(name.into()),
            admin_token: None,
        }
    }

    pub fn admin(token: impl Into<String>) -> Self {
        Self {
            role: Role::Admin,
            class: None,
            name: None,
            admin_token: Some(token.into()),
        }
    }

    pub fn kind(&self) -> SessionKind {
        match self.role {
            Role::Student => SessionKind::Student,
            Role::Admin => SessionKind::Admin,
        }
    }
}
