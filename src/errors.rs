//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 生命周期相关的错误（NotFound / Forbidden / StateConflict / Validation /
//! TransientUnavailable）对调用方可见，其中只有 TransientUnavailable 可以重试。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_labreview_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum LabReviewError {
            $($variant(String),)*
        }

        impl LabReviewError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(LabReviewError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(LabReviewError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(LabReviewError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl LabReviewError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        LabReviewError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_labreview_errors! {
    NotFound("E001", "Resource Not Found"),
    Forbidden("E002", "Forbidden"),
    StateConflict("E003", "State Conflict"),
    Validation("E004", "Validation Error"),
    TransientUnavailable("E005", "Transient Unavailable"),
    DatabaseConfig("E006", "Database Configuration Error"),
    DatabaseConnection("E007", "Database Connection Error"),
    DatabaseOperation("E008", "Database Operation Error"),
    FileOperation("E009", "File Operation Error"),
    Serialization("E010", "Serialization Error"),
    StoragePluginNotFound("E011", "Storage Plugin Not Found"),
    DateParse("E012", "Date Parse Error"),
}

impl LabReviewError {
    /// 是否可以原样重试（仅验证服务超时或不可用）
    pub fn is_retryable(&self) -> bool {
        matches!(self, LabReviewError::TransientUnavailable(_))
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LabReviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LabReviewError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LabReviewError {
    fn from(err: sea_orm::DbErr) -> Self {
        LabReviewError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LabReviewError {
    fn from(err: std::io::Error) -> Self {
        LabReviewError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LabReviewError {
    fn from(err: serde_json::Error) -> Self {
        LabReviewError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for LabReviewError {
    fn from(err: chrono::ParseError) -> Self {
        LabReviewError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LabReviewError>;
