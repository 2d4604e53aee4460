use serde::Deserialize;

use super::entities::RosterRow;

// roster 操作负载
#[derive(Debug, Deserialize)]
pub struct RosterPayload {
    #[serde(default)]
    pub roster: Vec<RosterRow>,
}
