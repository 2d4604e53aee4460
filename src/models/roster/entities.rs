use serde::{Deserialize, Serialize};

// 名单列：有资格回覆的 (班级, 姓名) 对
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRow {
    pub class: String,
    pub name: String,
    // 音乐班名单带乐器栏位
    #[serde(default)]
    pub instrument: Option<String>,
}
