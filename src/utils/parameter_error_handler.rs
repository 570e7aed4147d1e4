//! 请求参数错误处理器
//!
//! 将 actix 的 Query 解析错误转换为 LTI 错误响应。

use actix_web::{
    Error, HttpRequest,
    error::{InternalError, QueryPayloadError},
    http::StatusCode,
};
use tracing::debug;

use super::lti_response::lti_error_response;

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Invalid query string for {}: {}", req.path(), err);
    let message = format!("Invalid query parameters: {err}");
    InternalError::from_response(err, lti_error_response(StatusCode::BAD_REQUEST, message)).into()
}
