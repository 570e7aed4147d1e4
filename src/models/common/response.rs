use serde::{Deserialize, Serialize};

/// LTI 服务统一错误响应
///
/// 形如 `{"errors": {"message": "..."}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LtiErrorResponse {
    pub errors: LtiErrorMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LtiErrorMessage {
    pub message: String,
}

impl LtiErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            errors: LtiErrorMessage {
                message: message.into(),
            },
        }
    }
}
