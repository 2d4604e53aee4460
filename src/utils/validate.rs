use once_cell::sync::Lazy;
use regex::Regex;

static PIN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}$").expect("Invalid PIN regex"));

/// PIN 格式校验：5 码全数字
pub fn is_pin_shaped(input: &str) -> bool {
    PIN_RE.is_match(input)
}

pub fn validate_pin(pin: &str) -> Result<(), &'static str> {
    if !is_pin_shaped(pin) {
        return Err("PIN must be exactly 5 digits");
    }
    Ok(())
}

/// 管理金钥校验：非空，且不得长得像学生 PIN（登入入口靠这点分流）
pub fn validate_admin_token(token: &str) -> Result<(), &'static str> {
    if token.trim().is_empty() {
        return Err("Admin token must not be empty");
    }
    if is_pin_shaped(token.trim()) {
        return Err("A 5-digit value is treated as a student PIN, not an admin token");
    }
    Ok(())
}

/// 家长备注裁剪：超出上限时截断而不是拒绝
pub fn clamp_note(note: &str, max_chars: usize) -> String {
    note.chars().take(max_chars).collect()
}
