pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::errors::{LtiServiceError, Result};
use crate::models::courses::entities::Course;
use crate::models::line_items::{
    entities::LineItem,
    requests::LineItemListParams,
    responses::LineItemResponse,
};
use crate::storage::Storage;
use crate::utils::service_error_response;

pub(crate) const COURSE_NOT_FOUND: &str = "The specified course was not found.";
pub(crate) const LINE_ITEM_NOT_FOUND: &str = "The specified line item was not found.";

pub struct LineItemService {
    storage: Option<Arc<dyn Storage>>,
}

impl LineItemService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        if let Some(storage) = &self.storage {
            return Ok(storage.clone());
        }
        request
            .app_data::<web::Data<Arc<dyn Storage>>>()
            .map(|data| data.get_ref().clone())
            .ok_or_else(|| LtiServiceError::database_connection("Storage not found in app data"))
    }

    pub async fn list_line_items(
        &self,
        request: &HttpRequest,
        course_id: i64,
        query: LineItemListParams,
    ) -> ActixResult<HttpResponse> {
        respond(list::list_line_items(self, request, course_id, query).await)
    }

    pub async fn create_line_item(
        &self,
        request: &HttpRequest,
        course_id: i64,
        body: &[u8],
    ) -> ActixResult<HttpResponse> {
        respond(create::create_line_item(self, request, course_id, body).await)
    }

    pub async fn get_line_item(
        &self,
        request: &HttpRequest,
        course_id: i64,
        line_item_id: i64,
    ) -> ActixResult<HttpResponse> {
        respond(detail::get_line_item(self, request, course_id, line_item_id).await)
    }

    pub async fn update_line_item(
        &self,
        request: &HttpRequest,
        course_id: i64,
        line_item_id: i64,
        body: &[u8],
    ) -> ActixResult<HttpResponse> {
        respond(update::update_line_item(self, request, course_id, line_item_id, body).await)
    }

    pub async fn delete_line_item(
        &self,
        request: &HttpRequest,
        course_id: i64,
        line_item_id: i64,
    ) -> ActixResult<HttpResponse> {
        respond(delete::delete_line_item(self, request, course_id, line_item_id).await)
    }
}

// 业务错误统一转换为 LTI 错误响应
fn respond(result: Result<HttpResponse>) -> ActixResult<HttpResponse> {
    Ok(result.unwrap_or_else(|e| service_error_response(&e)))
}

/// 解析 JSON 请求体，解析失败视为参数错误
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| LtiServiceError::validation(format!("Invalid request body: {e}")))
}

/// 成绩项的绝对 URL
pub(crate) fn line_item_url(request: &HttpRequest, course_id: i64, line_item_id: i64) -> String {
    let info = request.connection_info();
    format!(
        "{}://{}/api/lti/courses/{}/line_items/{}",
        info.scheme(),
        info.host(),
        course_id,
        line_item_id
    )
}

pub(crate) fn to_response(request: &HttpRequest, course_id: i64, item: LineItem) -> LineItemResponse {
    let url = line_item_url(request, course_id, item.id);
    LineItemResponse::from_line_item(item, url)
}

/// 获取对工具可见的课程，不存在、已结课或已删除均视为 404
pub(crate) async fn find_visible_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<Course> {
    match storage.get_course_by_id(course_id).await? {
        Some(course) if course.is_visible_to_tools() => Ok(course),
        _ => Err(LtiServiceError::not_found(COURSE_NOT_FOUND)),
    }
}

/// 获取课程下的成绩项
pub(crate) async fn find_line_item_in_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    line_item_id: i64,
) -> Result<LineItem> {
    find_visible_course(storage, course_id).await?;
    storage
        .get_line_item_in_course(course_id, line_item_id)
        .await?
        .ok_or_else(|| LtiServiceError::not_found(LINE_ITEM_NOT_FOUND))
}

/// 是否为作业 + 资源链接组合下的默认成绩项，未关联资源链接的成绩项不是默认项
pub(crate) async fn is_default_line_item(
    storage: &Arc<dyn Storage>,
    item: &LineItem,
) -> Result<bool> {
    let Some(resource_link_pk) = item.resource_link_id else {
        return Ok(false);
    };
    let default_id = storage
        .default_line_item_id(item.assignment_id, resource_link_pk)
        .await?;
    Ok(default_id == Some(item.id))
}
