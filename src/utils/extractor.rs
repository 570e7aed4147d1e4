//! 安全路径参数提取器
//!
//! 非法 ID 统一返回 404，并使用 LTI 错误响应格式。

use actix_web::{
    Error, FromRequest, HttpRequest, dev::Payload, error::InternalError, http::StatusCode,
};
use futures_util::future::{Ready, ready};

use super::lti_response::lti_error_response;

fn parse_positive_i64(req: &HttpRequest, name: &str, not_found: &'static str) -> Result<i64, Error> {
    req.match_info()
        .get(name)
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|v| *v > 0)
        .ok_or_else(|| {
            InternalError::from_response(
                not_found,
                lti_error_response(StatusCode::NOT_FOUND, not_found),
            )
            .into()
        })
}

/// `{course_id}` 路径参数
#[derive(Debug, Clone, Copy)]
pub struct SafeCourseIdI64(pub i64);

impl FromRequest for SafeCourseIdI64 {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            parse_positive_i64(req, "course_id", "The specified course was not found.")
                .map(SafeCourseIdI64),
        )
    }
}

/// `{course_id}/line_items/{id}` 路径参数
#[derive(Debug, Clone, Copy)]
pub struct SafeLineItemPath {
    pub course_id: i64,
    pub line_item_id: i64,
}

impl FromRequest for SafeLineItemPath {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = parse_positive_i64(req, "course_id", "The specified course was not found.")
            .and_then(|course_id| {
                parse_positive_i64(req, "id", "The specified line item was not found.").map(
                    |line_item_id| SafeLineItemPath {
                        course_id,
                        line_item_id,
                    },
                )
            });
        ready(result)
    }
}
