//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_reply_client_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ReplyClientError {
            $($variant(String),)*
        }

        impl ReplyClientError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ReplyClientError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ReplyClientError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ReplyClientError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ReplyClientError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ReplyClientError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_reply_client_errors! {
    Network("E001", "Network Error"),
    ApiRejected("E002", "Api Rejected"),
    Envelope("E003", "Envelope Decode Error"),
    SessionStorage("E004", "Session Storage Error"),
    CacheFetch("E005", "Cache Fetch Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    Authentication("E010", "Authentication Error"),
    PayloadTooLarge("E011", "Payload Too Large"),
    FileOperation("E012", "File Operation Error"),
    Config("E013", "Configuration Error"),
}

impl ReplyClientError {
    /// 取后端回传的机器码（仅 ApiRejected 携带）
    pub fn api_code(&self) -> Option<&str> {
        match self {
            ReplyClientError::ApiRejected(code) => Some(code),
            _ => None,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ReplyClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ReplyClientError {}

// 为常见的错误类型实现 From trait
impl From<reqwest::Error> for ReplyClientError {
    fn from(err: reqwest::Error) -> Self {
        ReplyClientError::Network(err.to_string())
    }
}

impl From<std::io::Error> for ReplyClientError {
    fn from(err: std::io::Error) -> Self {
        ReplyClientError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ReplyClientError {
    fn from(err: serde_json::Error) -> Self {
        ReplyClientError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ReplyClientError {
    fn from(err: chrono::ParseError) -> Self {
        ReplyClientError::DateParse(err.to_string())
    }
}

impl From<config::ConfigError> for ReplyClientError {
    fn from(err: config::ConfigError) -> Self {
        ReplyClientError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReplyClientError>;
