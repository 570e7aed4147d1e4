use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireLtiToken;
use crate::models::line_items::requests::LineItemListParams;
use crate::services::LineItemService;
use crate::utils::{SafeCourseIdI64, SafeLineItemPath};

// 懒加载的全局 LineItemService 实例
static LINE_ITEM_SERVICE: Lazy<LineItemService> = Lazy::new(LineItemService::new_lazy);

// 列出课程下的成绩项
pub async fn list_line_items(
    req: HttpRequest,
    course: SafeCourseIdI64,
    query: web::Query<LineItemListParams>,
) -> ActixResult<HttpResponse> {
    LINE_ITEM_SERVICE
        .list_line_items(&req, course.0, query.into_inner())
        .await
}

// 创建成绩项（请求体在确认课程可见后解析）
pub async fn create_line_item(
    req: HttpRequest,
    course: SafeCourseIdI64,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    LINE_ITEM_SERVICE
        .create_line_item(&req, course.0, &body)
        .await
}

// 获取成绩项详情
pub async fn get_line_item(req: HttpRequest, path: SafeLineItemPath) -> ActixResult<HttpResponse> {
    LINE_ITEM_SERVICE
        .get_line_item(&req, path.course_id, path.line_item_id)
        .await
}

// 更新成绩项（请求体可为空）
pub async fn update_line_item(
    req: HttpRequest,
    path: SafeLineItemPath,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    LINE_ITEM_SERVICE
        .update_line_item(&req, path.course_id, path.line_item_id, &body)
        .await
}

// 删除成绩项
pub async fn delete_line_item(
    req: HttpRequest,
    path: SafeLineItemPath,
) -> ActixResult<HttpResponse> {
    LINE_ITEM_SERVICE
        .delete_line_item(&req, path.course_id, path.line_item_id)
        .await
}

// 配置路由
pub fn configure_line_item_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/lti/courses/{course_id}/line_items")
            .service(
                web::resource("")
                    // 列出成绩项 - lineitem 或 lineitem.readonly
                    .route(
                        web::get()
                            .to(list_line_items)
                            .wrap(RequireLtiToken::read()),
                    )
                    // 创建成绩项 - 仅 lineitem
                    .route(
                        web::post()
                            .to(create_line_item)
                            .wrap(RequireLtiToken::write()),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_line_item).wrap(RequireLtiToken::read()))
                    .route(
                        web::put()
                            .to(update_line_item)
                            .wrap(RequireLtiToken::write()),
                    )
                    .route(
                        web::delete()
                            .to(delete_line_item)
                            .wrap(RequireLtiToken::write()),
                    ),
            ),
    );
}
