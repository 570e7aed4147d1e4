use actix_web::{
    HttpRequest, HttpResponse,
    http::{StatusCode, header::LINK},
    web,
};

use super::{LineItemService, find_visible_course, to_response};
use crate::config::LtiConfig;
use crate::errors::Result;
use crate::models::PaginationInfo;
use crate::models::line_items::{
    LINE_ITEM_CONTAINER_MIME_TYPE,
    requests::{LineItemListParams, LineItemListQuery},
    responses::LineItemResponse,
};

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

/// limit 小于等于 0 时使用默认页大小，并限制在 1..=max
pub(crate) fn resolve_page_size(limit: i64, default_size: i64, max_size: i64) -> i64 {
    let max_size = max_size.max(1);
    let size = if limit <= 0 { default_size } else { limit };
    size.clamp(1, max_size)
}

fn page_size_limits(request: &HttpRequest) -> (i64, i64) {
    request
        .app_data::<web::Data<LtiConfig>>()
        .map(|c| (c.default_page_size as i64, c.max_page_size as i64))
        .unwrap_or((DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE))
}

/// 构造 RFC 8288 Link 头，保留 page / limit 以外的查询参数
pub(crate) fn build_link_header(base_url: &str, query_string: &str, info: &PaginationInfo) -> String {
    let preserved: Vec<&str> = query_string
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or_default();
            key != "page" && key != "limit"
        })
        .collect();

    let page_url = |page: i64| {
        let mut query = preserved.join("&");
        if !query.is_empty() {
            query.push('&');
        }
        format!("{base_url}?{query}page={page}&limit={}", info.page_size)
    };

    let mut links = vec![format!("<{}>; rel=\"first\"", page_url(1))];
    if info.has_next() {
        links.push(format!("<{}>; rel=\"next\"", page_url(info.page + 1)));
    }
    links.push(format!("<{}>; rel=\"last\"", page_url(info.last_page())));
    links.join(", ")
}

pub async fn list_line_items(
    service: &LineItemService,
    request: &HttpRequest,
    course_id: i64,
    query: LineItemListParams,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    find_visible_course(&storage, course_id).await?;

    let (default_size, max_size) = page_size_limits(request);
    let size = resolve_page_size(query.pagination.limit, default_size, max_size);

    let page = storage
        .list_line_items_with_pagination(LineItemListQuery {
            course_id,
            page: query.pagination.page.max(1),
            size,
            tag: query.tag,
            resource_id: query.resource_id,
            lti_link_id: query.lti_link_id,
        })
        .await?;

    let link_header = {
        let info = request.connection_info();
        let base_url = format!("{}://{}{}", info.scheme(), info.host(), request.path());
        build_link_header(&base_url, request.query_string(), &page.pagination)
    };

    let items: Vec<LineItemResponse> = page
        .items
        .into_iter()
        .map(|item| to_response(request, course_id, item))
        .collect();

    Ok(HttpResponse::build(StatusCode::OK)
        .content_type(LINE_ITEM_CONTAINER_MIME_TYPE)
        .insert_header((LINK, link_header))
        .json(items))
}
