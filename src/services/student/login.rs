use tracing::info;

use crate::errors::{ReplyClientError, Result};
use crate::models::Session;
use crate::utils::validate::is_pin_shaped;

use super::StudentService;

/// 学生登入：PIN 格式先在本地把关，再走远端验证，成功后落会话
pub async fn handle_login(
    service: &StudentService,
    class: &str,
    name: &str,
    pin: &str,
) -> Result<Session> {
    let class = class.trim();
    let name = name.trim();
    let pin = pin.trim();

    if class.is_empty() || name.is_empty() {
        return Err(ReplyClientError::validation("請輸入班級與姓名"));
    }
    if !is_pin_shaped(pin) {
        return Err(ReplyClientError::validation("密碼格式錯誤，應為 5 位數字"));
    }

    let payload = service.api().auth_student(class, name, pin).await?;

    // 以后端回传的标准化班级/姓名为准
    let session = Session::student(
        payload.class.unwrap_or_else(|| class.to_string()),
        payload.name.unwrap_or_else(|| name.to_string()),
    );
    service.save_session(&session).await?;
    info!(
        "Student logged in: {} {}",
        session.class.as_deref().unwrap_or_default(),
        session.name.as_deref().unwrap_or_default()
    );
    Ok(session)
}
