use crate::errors::{ReplyClientError, Result};
use crate::models::replies::entities::ReplyRecord;

use super::AdminService;

/// 查单一学生在全部活动的最新回覆
pub async fn handle_student_latest(
    service: &AdminService,
    class: &str,
    name: &str,
) -> Result<Vec<ReplyRecord>> {
    let class = class.trim();
    let name = name.trim();
    if class.is_empty() || name.is_empty() {
        return Err(ReplyClientError::validation("請輸入班級與姓名"));
    }

    let token = service.admin_token().await?;
    service
        .api()
        .admin_student_latest_all(&token, class, name)
        .await
}
