//! 错误到用户提示文字的映射
//!
//! 后端机器码有对应文案的用文案，没有的带码显示；
//! 网络层异常一律归为「網路或系統錯誤」。

use crate::errors::ReplyClientError;

pub fn user_message(err: &ReplyClientError) -> String {
    if let Some(code) = err.api_code() {
        return match code {
            "INVALID_CREDENTIALS" => "帳號或密碼格式錯誤。".to_string(),
            "NOT_FOUND_OR_DISABLED" => {
                "找不到此學生或帳號已停用，請確認班級、姓名與密碼。".to_string()
            }
            "DEADLINE_PASSED" => "已超過回覆截止時間，無法再送出或修改。".to_string(),
            "UNAUTHORIZED" => "登入失敗，請確認 token 是否正確。".to_string(),
            other => format!("操作失敗：{other}"),
        };
    }

    match err {
        ReplyClientError::Network(_) | ReplyClientError::Envelope(_) => {
            "網路或系統錯誤，請稍後再試。".to_string()
        }
        ReplyClientError::PayloadTooLarge(_) => {
            "簽名圖檔過大，請簽得稍微小一點或不要塗滿整個簽名區再試一次。".to_string()
        }
        ReplyClientError::Validation(msg) => msg.clone(),
        ReplyClientError::Authentication(_) => "請先登入。".to_string(),
        other => format!("操作失敗：{}", other.message()),
    }
}
