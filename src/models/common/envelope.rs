use serde::Deserialize;

use crate::errors::{ReplyClientError, Result};

// GAS 后端统一响应信封：{ ok, error?, message?, ...payload }
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: Option<T>,
}

impl<T> Envelope<T> {
    /// ok:false 映射为 ApiRejected（携带机器码），ok:true 取出负载
    pub fn into_result(self) -> Result<T> {
        if !self.ok {
            let code = self
                .error
                .or(self.message)
                .unwrap_or_else(|| "UNKNOWN".to_string());
            return Err(ReplyClientError::api_rejected(code));
        }
        self.payload
            .ok_or_else(|| ReplyClientError::envelope("response marked ok but payload is missing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::events::responses::EventsPayload;

    #[test]
    fn test_ok_envelope_carries_payload() {
        let json = r#"{"ok":true,"events":[{"eventId":"20260301-consent","title":"戶外教學"}]}"#;
        let env: Envelope<EventsPayload> = serde_json::from_str(json).unwrap();
        let payload = env.into_result().unwrap();
        assert_eq!(payload.events.len(), 1);
        assert_eq!(payload.events[0].event_id, "20260301-consent");
    }

    #[test]
    fn test_rejected_envelope_maps_to_api_code() {
        let json = r#"{"ok":false,"error":"DEADLINE_PASSED"}"#;
        let env: Envelope<EventsPayload> = serde_json::from_str(json).unwrap();
        let err = env.into_result().unwrap_err();
        assert_eq!(err.api_code(), Some("DEADLINE_PASSED"));
    }

    #[test]
    fn test_rejected_envelope_falls_back_to_message() {
        let json = r#"{"ok":false,"message":"bad token"}"#;
        let env: Envelope<EventsPayload> = serde_json::from_str(json).unwrap();
        let err = env.into_result().unwrap_err();
        assert_eq!(err.api_code(), Some("bad token"));
    }
}
