use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub session: SessionConfig,
    pub form: FormConfig,
    pub events: EventRules,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 远端 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: String, // GAS Web App 部署地址（以 /exec 结尾）
}

/// 明细缓存 / 预取配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub default_ttl: u64,          // 缓存有效期（秒）
    pub prefetch_concurrency: usize, // 预取工作池并发数
    pub prefetch_count: usize,     // 每次摘要加载后预取的活动数
}

/// 会话存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub dir: String, // 会话 JSON 文件目录
}

/// 回条表单配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub max_answer_bytes: usize,     // answer JSON 序列化上限
    pub signature_budget_chars: usize, // 签名 dataURL 长度预算
    pub note_max_chars: usize,       // 家长备注字数上限
}

/// 活动规则（同意书 / 遊覽車活动判定）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRules {
    pub bus_trip_event_ids: Vec<String>, // 需收集去/回程搭车选项的活动白名单
}
