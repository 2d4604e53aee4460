//! 仁和活動回條 - 客户端核心
//!
//! 针对试算表后端 API 的活动回条 / 家长同意书客户端。
//!
//! # 架构
//! - `api`: 远端 API 客户端（单端点 GET/POST 信封）
//! - `cache`: 明细缓存与预取控制器
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `forms`: 学生回条表单模型与签名状态机
//! - `models`: 数据模型定义
//! - `services`: 业务逻辑层（学生 / 管理者）
//! - `session`: 会话持久化
//! - `utils`: 工具函数
//! - `view`: 明细表格视图状态与投影

pub mod api;
pub mod cache;
pub mod config;
pub mod errors;
pub mod forms;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;
pub mod view;
