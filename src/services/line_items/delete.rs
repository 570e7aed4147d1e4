use actix_web::{HttpRequest, HttpResponse, http::StatusCode};
use tracing::info;

use super::{
    LINE_ITEM_NOT_FOUND, LineItemService, find_line_item_in_course, is_default_line_item,
};
use crate::errors::{LtiServiceError, Result};
use crate::middlewares::RequireLtiToken;
use crate::utils::line_item_empty;

pub async fn delete_line_item(
    service: &LineItemService,
    request: &HttpRequest,
    course_id: i64,
    line_item_id: i64,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    let item = find_line_item_in_course(&storage, course_id, line_item_id).await?;

    // 默认成绩项随作业存在，不允许工具删除
    if is_default_line_item(&storage, &item).await? {
        return Err(LtiServiceError::authorization(
            "The default line item of an assignment cannot be deleted.",
        ));
    }

    if !storage.delete_line_item(item.id).await? {
        return Err(LtiServiceError::not_found(LINE_ITEM_NOT_FOUND));
    }

    info!(
        "Line item {} in course {} deleted by tool {}",
        item.id,
        course_id,
        RequireLtiToken::extract_client_id(request).unwrap_or_default()
    );

    Ok(line_item_empty(StatusCode::NO_CONTENT))
}
