use tracing::info;

use crate::errors::{ReplyClientError, Result};
use crate::models::Session;
use crate::utils::validate::validate_admin_token;

use super::AdminService;

/// 管理者登入：金钥格式先本地把关，远端验证通过后落会话
pub async fn handle_login(service: &AdminService, token: &str) -> Result<Session> {
    let token = token.trim();
    validate_admin_token(token).map_err(ReplyClientError::validation)?;

    service.api().auth_admin(token).await?;

    let session = Session::admin(token);
    service.save_session(&session).await?;
    info!("Admin logged in");
    Ok(session)
}
