use tracing::debug;

use crate::errors::{ReplyClientError, Result};

/// 签名编码器接口。像素管线（画布栅格化、缩放、JPEG 压缩）在接口之外，
/// 这里只约定「给品质、回 dataURL」。
pub trait SignatureEncoder {
    fn encode(&self, quality: f32) -> Result<String>;
}

/// 签名字段状态机：Empty -> Drawing -> Captured，reset 回到 Empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureState {
    Empty,
    Drawing,
    Captured(String),
}

// 由高到低逐级降品质，直到 dataURL 塞进预算
const QUALITY_STEPS: &[f32] = &[0.8, 0.7, 0.6, 0.5, 0.4, 0.3];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureField {
    state: SignatureState,
}

impl Default for SignatureField {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureField {
    pub fn new() -> Self {
        Self {
            state: SignatureState::Empty,
        }
    }

    /// 用既有答案里的签名预填（修改回条时沿用上次的签名）
    pub fn from_existing(data_url: Option<String>) -> Self {
        Self {
            state: match data_url {
                Some(url) if !url.is_empty() => SignatureState::Captured(url),
                _ => SignatureState::Empty,
            },
        }
    }

    pub fn state(&self) -> &SignatureState {
        &self.state
    }

    pub fn data_url(&self) -> Option<&str> {
        match &self.state {
            SignatureState::Captured(url) => Some(url),
            _ => None,
        }
    }

    pub fn is_captured(&self) -> bool {
        matches!(self.state, SignatureState::Captured(_))
    }

    /// 开始书写（从任何状态都允许重签）
    pub fn begin_drawing(&mut self) {
        self.state = SignatureState::Drawing;
    }

    pub fn reset(&mut self) {
        self.state = SignatureState::Empty;
    }

    /// 定稿：反复降品质重编码，直到 dataURL 长度不超过预算。
    /// 品质降到下限仍超预算时整次定稿失败，状态保持 Drawing。
    pub fn capture(&mut self, encoder: &dyn SignatureEncoder, budget_chars: usize) -> Result<&str> {
        if self.state != SignatureState::Drawing {
            return Err(ReplyClientError::validation(
                "signature capture requires an active drawing",
            ));
        }

        for &quality in QUALITY_STEPS {
            let data_url = encoder.encode(quality)?;
            if data_url.len() <= budget_chars {
                debug!(
                    "Signature captured at quality {} ({} chars)",
                    quality,
                    data_url.len()
                );
                self.state = SignatureState::Captured(data_url);
                return match &self.state {
                    SignatureState::Captured(url) => Ok(url),
                    _ => unreachable!(),
                };
            }
        }

        Err(ReplyClientError::payload_too_large(format!(
            "signature exceeds {budget_chars} chars at minimum quality"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// dataURL 长度与品质成正比的假编码器
    struct LinearEncoder {
        chars_per_unit: usize,
        tried: RefCell<Vec<f32>>,
    }

    impl LinearEncoder {
        fn new(chars_per_unit: usize) -> Self {
            Self {
                chars_per_unit,
                tried: RefCell::new(Vec::new()),
            }
        }
    }

    impl SignatureEncoder for LinearEncoder {
        fn encode(&self, quality: f32) -> Result<String> {
            self.tried.borrow_mut().push(quality);
            let len = (quality * self.chars_per_unit as f32) as usize;
            Ok(format!("data:image/jpeg;base64,{}", "A".repeat(len)))
        }
    }

    #[test]
    fn test_capture_lowers_quality_until_budget_fits() {
        // 0.8 * 100_000 = 80_000 超预算，0.4 * 100_000 = 40_000 放得下
        let encoder = LinearEncoder::new(100_000);
        let mut field = SignatureField::new();
        field.begin_drawing();

        let url = field.capture(&encoder, 42_000).unwrap().to_string();
        assert!(url.len() <= 42_000 + "data:image/jpeg;base64,".len());
        assert!(field.is_captured());
        assert_eq!(*encoder.tried.borrow(), vec![0.8, 0.7, 0.6, 0.5, 0.4]);
    }

    #[test]
    fn test_capture_fails_when_floor_quality_still_too_big() {
        let encoder = LinearEncoder::new(1_000_000);
        let mut field = SignatureField::new();
        field.begin_drawing();

        let err = field.capture(&encoder, 42_000).unwrap_err();
        assert_eq!(err.code(), "E011");
        // 失败后可以继续书写或重来
        assert_eq!(field.state(), &SignatureState::Drawing);
    }

    #[test]
    fn test_capture_outside_drawing_is_rejected() {
        let encoder = LinearEncoder::new(10);
        let mut field = SignatureField::new();
        assert_eq!(field.capture(&encoder, 42_000).unwrap_err().code(), "E006");
    }

    #[test]
    fn test_reset_returns_to_empty() {
        let mut field = SignatureField::from_existing(Some("data:image/jpeg;base64,AA".into()));
        assert!(field.is_captured());
        field.reset();
        assert_eq!(field.state(), &SignatureState::Empty);
    }
}
