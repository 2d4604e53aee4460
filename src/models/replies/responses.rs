use serde::Deserialize;

use super::entities::ReplyRecord;

// latestAll / adminStudentLatestAll 负载
#[derive(Debug, Deserialize)]
pub struct LatestPayload {
    #[serde(default)]
    pub latest: Vec<ReplyRecord>,
}

// reply / adminReply 负载：后端回传写入时间戳
#[derive(Debug, Deserialize)]
pub struct ReplyAck {
    pub ts: String,
}
