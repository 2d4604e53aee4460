use serde::Serialize;

// 学生登入请求（5 码数字 PIN）
#[derive(Debug, Serialize)]
pub struct StudentAuthRequest {
    pub class: String,
    pub name: String,
    pub pin: String,
}

// 管理者登入请求
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAuthRequest {
    pub admin_token: String,
}
