//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称以及对应的 HTTP 状态码。

use actix_web::http::StatusCode;
use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status() 方法 - 返回对应的 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_lti_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum LtiServiceError {
            $($variant(String),)*
        }

        impl LtiServiceError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(LtiServiceError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(LtiServiceError::$variant(_) => $type_name,)*
                }
            }

            /// 获取对应的 HTTP 状态码
            pub fn status(&self) -> StatusCode {
                match self {
                    $(LtiServiceError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(LtiServiceError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl LtiServiceError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        LtiServiceError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_lti_errors! {
    DatabaseConfig("E001", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E002", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E003", "Database Operation Error", INTERNAL_SERVER_ERROR),
    Configuration("E004", "Configuration Error", INTERNAL_SERVER_ERROR),
    Validation("E005", "Validation Error", BAD_REQUEST),
    NotFound("E006", "Resource Not Found", NOT_FOUND),
    PreconditionFailed("E007", "Precondition Failed", PRECONDITION_FAILED),
    Authentication("E008", "Authentication Error", UNAUTHORIZED),
    Authorization("E009", "Authorization Error", UNAUTHORIZED),
}

impl LtiServiceError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为服务端内部错误（需要记录日志，且不应把细节暴露给调用方）
    pub fn is_internal(&self) -> bool {
        self.status().is_server_error()
    }
}

impl fmt::Display for LtiServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LtiServiceError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LtiServiceError {
    fn from(err: sea_orm::DbErr) -> Self {
        LtiServiceError::DatabaseOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LtiServiceError>;
