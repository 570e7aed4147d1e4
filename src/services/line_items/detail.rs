use actix_web::{HttpRequest, HttpResponse, http::StatusCode};

use super::{LineItemService, find_line_item_in_course, to_response};
use crate::errors::Result;
use crate::utils::line_item_json;

pub async fn get_line_item(
    service: &LineItemService,
    request: &HttpRequest,
    course_id: i64,
    line_item_id: i64,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    let item = find_line_item_in_course(&storage, course_id, line_item_id).await?;

    Ok(line_item_json(
        StatusCode::OK,
        &to_response(request, course_id, item),
    ))
}
