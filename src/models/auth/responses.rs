use serde::Deserialize;

// auth 操作负载：学生回传 class/name，管理者只回传 role
#[derive(Debug, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}
