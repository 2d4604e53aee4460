use serde::Serialize;

// 学生送出回条请求
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub event_id: String,
    pub class: String,
    pub name: String,
    // JSON 编码后的答案对象
    pub answer: String,
}

// 管理者代填回条请求
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReplyRequest {
    pub event_id: String,
    pub class: String,
    pub name: String,
    pub answer: String,
    pub admin_token: String,
}
