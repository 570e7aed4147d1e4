use actix_web::{HttpRequest, HttpResponse, http::StatusCode};
use tracing::{debug, info};

use super::{
    LINE_ITEM_NOT_FOUND, LineItemService, find_line_item_in_course, is_default_line_item,
    parse_json_body, to_response,
};
use crate::errors::{LtiServiceError, Result};
use crate::models::line_items::requests::UpdateLineItemRequest;
use crate::utils::line_item_json;
use crate::utils::validate::{LineItemFields, validate_line_item_fields};

pub(crate) const LTI_LINK_MISMATCH: &str =
    "The specified LTI link ID is not associated with the line item.";

/// 解析更新请求体，空请求体表示不修改任何字段
pub(crate) fn parse_update_body(body: &[u8]) -> Result<UpdateLineItemRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(UpdateLineItemRequest::default());
    }
    parse_json_body(body)
}

pub async fn update_line_item(
    service: &LineItemService,
    request: &HttpRequest,
    course_id: i64,
    line_item_id: i64,
    body: &[u8],
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    let item = find_line_item_in_course(&storage, course_id, line_item_id).await?;
    let req = parse_update_body(body)?;

    if let Some(lti_link_id) = req.lti_link_id.as_deref()
        && item.lti_link_id.as_deref() != Some(lti_link_id)
    {
        debug!(
            "LTI link ID {} does not match line item {} (current: {:?})",
            lti_link_id, item.id, item.lti_link_id
        );
        return Err(LtiServiceError::precondition_failed(LTI_LINK_MISMATCH));
    }

    let validation = validate_line_item_fields(LineItemFields {
        score_maximum: req.score_maximum,
        label: req.label.as_deref(),
        resource_id: req.resource_id.as_deref(),
        tag: req.tag.as_deref(),
    });
    if !validation.is_valid {
        return Err(LtiServiceError::validation(validation.error_message()));
    }

    // 未关联资源链接或为默认成绩项时，标签同步为作业名称
    let rename_assignment = req.label.is_some()
        && (!item.is_coupled() || is_default_line_item(&storage, &item).await?);

    let updated = storage
        .update_line_item(item.id, req.into_changes(), rename_assignment)
        .await?
        .ok_or_else(|| LtiServiceError::not_found(LINE_ITEM_NOT_FOUND))?;

    if rename_assignment {
        info!(
            "Assignment {} renamed to line item {} label",
            updated.assignment_id, updated.id
        );
    }

    Ok(line_item_json(
        StatusCode::OK,
        &to_response(request, course_id, updated),
    ))
}
