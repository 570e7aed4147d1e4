use actix_web::{HttpRequest, HttpResponse, http::StatusCode};
use std::sync::Arc;
use tracing::info;

use super::{LineItemService, find_visible_course, parse_json_body, to_response};
use crate::errors::{LtiServiceError, Result};
use crate::models::assignments::{entities::SUBMISSION_TYPES_NONE, requests::CreateAssignmentRequest};
use crate::models::line_items::{
    entities::LineItem,
    requests::{CreateLineItemRequest, NewLineItem},
};
use crate::storage::Storage;
use crate::utils::line_item_json;
use crate::utils::validate::{LineItemFields, validate_line_item_fields};

/// 解析创建请求体，请求体不能为空
pub(crate) fn parse_create_body(body: &[u8]) -> Result<CreateLineItemRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(LtiServiceError::validation("Request body is required"));
    }
    parse_json_body(body)
}

pub async fn create_line_item(
    service: &LineItemService,
    request: &HttpRequest,
    course_id: i64,
    body: &[u8],
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    // 先确认课程可见，再解析请求体
    find_visible_course(&storage, course_id).await?;
    let req = parse_create_body(body)?;

    let validation = validate_line_item_fields(LineItemFields {
        score_maximum: Some(req.score_maximum),
        label: Some(&req.label),
        resource_id: req.resource_id.as_deref(),
        tag: req.tag.as_deref(),
    });
    if !validation.is_valid {
        return Err(LtiServiceError::validation(validation.error_message()));
    }

    let item = match req.lti_link_id.clone() {
        Some(lti_link_id) => create_declarative(&storage, course_id, &lti_link_id, req).await?,
        None => create_uncoupled(&storage, course_id, req).await?,
    };

    Ok(line_item_json(
        StatusCode::CREATED,
        &to_response(request, course_id, item),
    ))
}

/// 声明式模型：挂到资源链接已有的作业上，不创建新作业
async fn create_declarative(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    lti_link_id: &str,
    req: CreateLineItemRequest,
) -> Result<LineItem> {
    let link = storage
        .get_resource_link_by_lti_id(lti_link_id)
        .await?
        .ok_or_else(|| LtiServiceError::not_found("The specified LTI link ID was not found."))?;

    let first = storage
        .first_line_item_for_resource_link(link.id)
        .await?
        .ok_or_else(|| {
            LtiServiceError::precondition_failed(
                "The specified LTI link ID has no line items to attach to.",
            )
        })?;

    // 资源链接的作业必须属于路径中的课程
    let assignment = storage
        .get_assignment_by_id(first.assignment_id)
        .await?
        .filter(|a| a.course_id == course_id)
        .ok_or_else(|| LtiServiceError::not_found("The specified LTI link ID was not found."))?;

    let item = storage
        .create_line_item(NewLineItem {
            assignment_id: assignment.id,
            resource_link_id: Some(link.id),
            score_maximum: req.score_maximum,
            label: req.label,
            resource_id: req.resource_id,
            tag: req.tag,
        })
        .await?;

    info!(
        "Line item {} created for assignment {} via resource link {}",
        item.id, assignment.id, link.resource_link_id
    );
    Ok(item)
}

/// 非耦合模型：新建作业，与成绩项在同一事务中写入
async fn create_uncoupled(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    req: CreateLineItemRequest,
) -> Result<LineItem> {
    let assignment = CreateAssignmentRequest {
        course_id,
        name: req.label.clone(),
        points_possible: Some(req.score_maximum),
        submission_types: SUBMISSION_TYPES_NONE.to_string(),
    };

    let (assignment, item) = storage
        .create_line_item_with_assignment(
            assignment,
            NewLineItem {
                assignment_id: 0,
                resource_link_id: None,
                score_maximum: req.score_maximum,
                label: req.label,
                resource_id: req.resource_id,
                tag: req.tag,
            },
        )
        .await?;

    info!(
        "Line item {} created with new assignment {} in course {}",
        item.id, assignment.id, course_id
    );
    Ok(item)
}
