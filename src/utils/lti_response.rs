//! LTI 响应构造辅助函数
//!
//! 所有成绩项相关响应（包括错误）都使用成绩项媒体类型。

use actix_web::{HttpResponse, http::StatusCode};
use serde::Serialize;
use tracing::error;

use crate::errors::LtiServiceError;
use crate::models::LtiErrorResponse;
use crate::models::line_items::LINE_ITEM_MIME_TYPE;

/// 以成绩项媒体类型返回 JSON
pub fn line_item_json<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(LINE_ITEM_MIME_TYPE)
        .json(body)
}

/// 以成绩项媒体类型返回空响应
pub fn line_item_empty(status: StatusCode) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(LINE_ITEM_MIME_TYPE)
        .finish()
}

/// 构造 `{"errors": {"message": ...}}` 错误响应
pub fn lti_error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    line_item_json(status, &LtiErrorResponse::new(message))
}

/// 将服务错误转换为 HTTP 响应，内部错误只记录日志不暴露细节
pub fn service_error_response(err: &LtiServiceError) -> HttpResponse {
    if err.is_internal() {
        error!("{}", err.format_simple());
        return lti_error_response(err.status(), "Internal server error");
    }
    lti_error_response(err.status(), err.message())
}
