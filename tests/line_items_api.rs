#[macro_use]
mod common;

use actix_web::http::{
    StatusCode,
    header::{CONTENT_TYPE, LINK},
};
use actix_web::test;
use serde_json::{Value, json};

use common::{TestContext, id_from_url, line_item_path, line_items_path};
use lti_line_items::models::line_items::{LINE_ITEM_CONTAINER_MIME_TYPE, LINE_ITEM_MIME_TYPE};
use lti_line_items::storage::Storage;

const LINE_ITEM_CONTENT_TYPE: (&str, &str) = ("Content-Type", LINE_ITEM_MIME_TYPE);

fn content_type<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
    resp.headers()
        .get(CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_create_declarative_reuses_assignment() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);

    let course = ctx.course("Biology").await;
    let assignment = ctx.assignment(&course, "Lab Report").await;
    let link = ctx.resource_link(&assignment.lti_context_id).await;
    ctx.line_item(&assignment, Some(&link), "Lab Report").await;

    let before = ctx.storage.count_assignments(Some(course.id)).await.unwrap();

    let req = test::TestRequest::post()
        .uri(&line_items_path(course.id))
        .insert_header(ctx.write_auth())
        .insert_header(LINE_ITEM_CONTENT_TYPE)
        .set_payload(
            json!({
                "scoreMaximum": 50,
                "label": "Originality Score",
                "resourceId": "orig-123",
                "tag": "some_tag",
                "ltiLinkId": assignment.lti_context_id,
            })
            .to_string(),
        )
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(content_type(&resp), LINE_ITEM_MIME_TYPE);

    let body: Value = test::read_body_json(resp).await;
    let url = body["id"].as_str().unwrap();
    let new_id = id_from_url(url);
    assert!(url.contains(&format!("/line_items/{new_id}")));
    assert_eq!(body["scoreMaximum"], json!(50.0));
    assert_eq!(body["label"], "Originality Score");
    assert_eq!(body["resourceId"], "orig-123");
    assert_eq!(body["tag"], "some_tag");
    assert_eq!(body["ltiLinkId"], json!(assignment.lti_context_id));

    let after = ctx.storage.count_assignments(Some(course.id)).await.unwrap();
    assert_eq!(before, after);

    let created = ctx.storage.get_line_item_by_id(new_id).await.unwrap().unwrap();
    assert_eq!(created.resource_link_id, Some(link.id));
    assert_eq!(created.assignment_id, assignment.id);
}

#[actix_web::test]
async fn test_create_uncoupled_creates_assignment() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Chemistry").await;

    assert_eq!(ctx.storage.count_assignments(Some(course.id)).await.unwrap(), 0);

    let req = test::TestRequest::post()
        .uri(&line_items_path(course.id))
        .insert_header(ctx.write_auth())
        .set_json(json!({
            "scoreMaximum": 50,
            "label": "Originality Score",
            "resourceId": "orig-123",
            "tag": "some_tag",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body.get("ltiLinkId").is_none());

    assert_eq!(ctx.storage.count_assignments(Some(course.id)).await.unwrap(), 1);

    let item = ctx
        .storage
        .get_line_item_by_id(id_from_url(body["id"].as_str().unwrap()))
        .await
        .unwrap()
        .unwrap();
    assert!(item.resource_link_id.is_none());

    let assignment = ctx
        .storage
        .get_assignment_by_id(item.assignment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assignment.points_possible, Some(50.0));
    assert_eq!(assignment.submission_types, "none");
    assert_eq!(assignment.name, "Originality Score");
    assert_eq!(assignment.course_id, course.id);
}

#[actix_web::test]
async fn test_create_with_link_without_line_items_is_precondition_failed() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Physics").await;
    ctx.resource_link("empty-link").await;

    let req = test::TestRequest::post()
        .uri(&line_items_path(course.id))
        .insert_header(ctx.write_auth())
        .set_json(json!({
            "scoreMaximum": 10,
            "label": "Quiz",
            "ltiLinkId": "empty-link",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);
    assert_eq!(content_type(&resp), LINE_ITEM_MIME_TYPE);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["message"].is_string());
}

#[actix_web::test]
async fn test_create_with_unknown_link_is_not_found() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Physics").await;

    let req = test::TestRequest::post()
        .uri(&line_items_path(course.id))
        .insert_header(ctx.write_auth())
        .set_json(json!({
            "scoreMaximum": 10,
            "label": "Quiz",
            "ltiLinkId": "does-not-exist",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(ctx.storage.count_line_items().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_create_with_link_from_other_course_is_not_found() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Physics").await;
    let other = ctx.course("History").await;
    let assignment = ctx.assignment(&other, "Essay").await;
    let link = ctx.resource_link("history-link").await;
    ctx.line_item(&assignment, Some(&link), "Essay").await;

    let req = test::TestRequest::post()
        .uri(&line_items_path(course.id))
        .insert_header(ctx.write_auth())
        .set_json(json!({
            "scoreMaximum": 10,
            "label": "Quiz",
            "ltiLinkId": "history-link",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_create_in_concluded_course_is_not_found() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Archived").await;
    ctx.conclude(&course).await;

    let req = test::TestRequest::post()
        .uri(&line_items_path(course.id))
        .insert_header(ctx.write_auth())
        .set_json(json!({"scoreMaximum": 10, "label": "Quiz"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(ctx.storage.count_assignments(Some(course.id)).await.unwrap(), 0);
}

#[actix_web::test]
async fn test_create_rejects_invalid_body() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Math").await;

    // 缺少 label
    let req = test::TestRequest::post()
        .uri(&line_items_path(course.id))
        .insert_header(ctx.write_auth())
        .set_json(json!({"scoreMaximum": 10}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(content_type(&resp), LINE_ITEM_MIME_TYPE);

    // 负分
    let req = test::TestRequest::post()
        .uri(&line_items_path(course.id))
        .insert_header(ctx.write_auth())
        .set_json(json!({"scoreMaximum": -1, "label": "Quiz"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 空白 label
    let req = test::TestRequest::post()
        .uri(&line_items_path(course.id))
        .insert_header(ctx.write_auth())
        .set_json(json!({"scoreMaximum": 1, "label": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(ctx.storage.count_line_items().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_create_checks_course_before_body() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Archived").await;
    ctx.conclude(&course).await;

    // 已结课课程上的非法请求体仍返回 404
    let req = test::TestRequest::post()
        .uri(&line_items_path(course.id))
        .insert_header(ctx.write_auth())
        .insert_header(LINE_ITEM_CONTENT_TYPE)
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(content_type(&resp), LINE_ITEM_MIME_TYPE);

    // 不存在的课程同理
    let req = test::TestRequest::post()
        .uri(&line_items_path(course.id + 1000))
        .insert_header(ctx.write_auth())
        .set_payload("")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_create_with_malformed_body_is_bad_request() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Math").await;

    let req = test::TestRequest::post()
        .uri(&line_items_path(course.id))
        .insert_header(ctx.write_auth())
        .insert_header(LINE_ITEM_CONTENT_TYPE)
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(content_type(&resp), LINE_ITEM_MIME_TYPE);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["message"].is_string());
}

// ---------------------------------------------------------------------------
// update
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_update_label_renames_uncoupled_assignment() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;
    let assignment = ctx.assignment(&course, "Old Name").await;
    let item = ctx.line_item(&assignment, None, "Old Name").await;

    let req = test::TestRequest::put()
        .uri(&line_item_path(course.id, item.id))
        .insert_header(ctx.write_auth())
        .set_json(json!({"label": "New Name"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), LINE_ITEM_MIME_TYPE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["label"], "New Name");
    assert_eq!(ctx.assignment_name(assignment.id).await, "New Name");
}

#[actix_web::test]
async fn test_update_label_renames_assignment_of_default_line_item() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;
    let assignment = ctx.assignment(&course, "Old Name").await;
    let link = ctx.resource_link(&assignment.lti_context_id).await;
    let default_item = ctx.line_item(&assignment, Some(&link), "Old Name").await;

    let req = test::TestRequest::put()
        .uri(&line_item_path(course.id, default_item.id))
        .insert_header(ctx.write_auth())
        .set_json(json!({"label": "Renamed"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.assignment_name(assignment.id).await, "Renamed");
}

#[actix_web::test]
async fn test_update_label_keeps_assignment_name_for_non_default_item() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;
    let assignment = ctx.assignment(&course, "Lab Report").await;
    let link = ctx.resource_link(&assignment.lti_context_id).await;
    ctx.line_item(&assignment, Some(&link), "Lab Report").await;
    let extra = ctx.line_item(&assignment, Some(&link), "Originality").await;

    let req = test::TestRequest::put()
        .uri(&line_item_path(course.id, extra.id))
        .insert_header(ctx.write_auth())
        .set_json(json!({"label": "Originality Score"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["label"], "Originality Score");
    assert_eq!(ctx.assignment_name(assignment.id).await, "Lab Report");
}

#[actix_web::test]
async fn test_update_with_mismatched_link_is_precondition_failed() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;
    let assignment = ctx.assignment(&course, "Lab Report").await;
    let link = ctx.resource_link(&assignment.lti_context_id).await;
    let item = ctx.line_item(&assignment, Some(&link), "Lab Report").await;

    let req = test::TestRequest::put()
        .uri(&line_item_path(course.id, item.id))
        .insert_header(ctx.write_auth())
        .set_json(json!({"label": "Changed", "ltiLinkId": "some-other-link"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);
    assert_eq!(content_type(&resp), LINE_ITEM_MIME_TYPE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"]["message"],
        "The specified LTI link ID is not associated with the line item."
    );

    let unchanged = ctx.storage.get_line_item_by_id(item.id).await.unwrap().unwrap();
    assert_eq!(unchanged.label, "Lab Report");
}

#[actix_web::test]
async fn test_update_with_link_on_uncoupled_item_is_precondition_failed() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;
    let assignment = ctx.assignment(&course, "Lab Report").await;
    let item = ctx.line_item(&assignment, None, "Lab Report").await;

    let req = test::TestRequest::put()
        .uri(&line_item_path(course.id, item.id))
        .insert_header(ctx.write_auth())
        .set_json(json!({"ltiLinkId": assignment.lti_context_id}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);
}

#[actix_web::test]
async fn test_update_fields_with_matching_link() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;
    let assignment = ctx.assignment(&course, "Lab Report").await;
    let link = ctx.resource_link(&assignment.lti_context_id).await;
    let item = ctx.line_item(&assignment, Some(&link), "Lab Report").await;

    let req = test::TestRequest::put()
        .uri(&line_item_path(course.id, item.id))
        .insert_header(ctx.write_auth())
        .insert_header(LINE_ITEM_CONTENT_TYPE)
        .set_payload(
            json!({
                "scoreMaximum": 88.5,
                "resourceId": "new-resource",
                "tag": "New Tag",
                "ltiLinkId": assignment.lti_context_id,
            })
            .to_string(),
        )
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["scoreMaximum"], json!(88.5));
    assert_eq!(body["resourceId"], "new-resource");
    assert_eq!(body["tag"], "New Tag");
    assert_eq!(body["label"], "Lab Report");
    assert_eq!(body["ltiLinkId"], json!(assignment.lti_context_id));
}

#[actix_web::test]
async fn test_update_with_empty_body_returns_current_state() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;
    let assignment = ctx.assignment(&course, "Lab Report").await;
    let item = ctx.line_item(&assignment, None, "Lab Report").await;

    let req = test::TestRequest::put()
        .uri(&line_item_path(course.id, item.id))
        .insert_header(ctx.write_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["label"], "Lab Report");
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_show_line_item() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;
    let assignment = ctx.assignment(&course, "Lab Report").await;
    let link = ctx.resource_link(&assignment.lti_context_id).await;
    let item = ctx.line_item(&assignment, Some(&link), "Lab Report").await;

    let req = test::TestRequest::get()
        .uri(&line_item_path(course.id, item.id))
        .insert_header(ctx.read_only_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), LINE_ITEM_MIME_TYPE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["id"],
        format!(
            "http://localhost:8080/api/lti/courses/{}/line_items/{}",
            course.id, item.id
        )
    );
    assert_eq!(body["scoreMaximum"], json!(10.0));
    assert_eq!(body["label"], "Lab Report");
    assert_eq!(body["ltiLinkId"], json!(assignment.lti_context_id));
    assert!(body.get("resourceId").is_none());
    assert!(body.get("tag").is_none());
}

#[actix_web::test]
async fn test_show_not_found_cases() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;
    let other = ctx.course("History").await;
    let assignment = ctx.assignment(&other, "Essay").await;
    let item = ctx.line_item(&assignment, None, "Essay").await;

    // 成绩项属于其他课程
    let req = test::TestRequest::get()
        .uri(&line_item_path(course.id, item.id))
        .insert_header(ctx.write_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(content_type(&resp), LINE_ITEM_MIME_TYPE);

    // 成绩项不存在
    let req = test::TestRequest::get()
        .uri(&line_item_path(other.id, item.id + 1000))
        .insert_header(ctx.write_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 课程不存在
    let req = test::TestRequest::get()
        .uri(&line_item_path(other.id + 1000, item.id))
        .insert_header(ctx.write_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 非数字 ID
    let req = test::TestRequest::get()
        .uri(&format!("/api/lti/courses/{}/line_items/abc", other.id))
        .insert_header(ctx.write_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(content_type(&resp), LINE_ITEM_MIME_TYPE);
}

#[actix_web::test]
async fn test_show_in_concluded_course_is_not_found() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;
    let assignment = ctx.assignment(&course, "Lab Report").await;
    let item = ctx.line_item(&assignment, None, "Lab Report").await;
    ctx.conclude(&course).await;

    let req = test::TestRequest::get()
        .uri(&line_item_path(course.id, item.id))
        .insert_header(ctx.write_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// destroy
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_destroy_default_line_item_is_unauthorized() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;
    let assignment = ctx.assignment(&course, "Lab Report").await;
    let link = ctx.resource_link(&assignment.lti_context_id).await;
    let default_item = ctx.line_item(&assignment, Some(&link), "Lab Report").await;

    let req = test::TestRequest::delete()
        .uri(&line_item_path(course.id, default_item.id))
        .insert_header(ctx.write_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(content_type(&resp), LINE_ITEM_MIME_TYPE);
    assert!(
        ctx.storage
            .get_line_item_by_id(default_item.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[actix_web::test]
async fn test_destroy_non_default_line_item() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;
    let assignment = ctx.assignment(&course, "Lab Report").await;
    let link = ctx.resource_link(&assignment.lti_context_id).await;
    ctx.line_item(&assignment, Some(&link), "Lab Report").await;
    let extra = ctx.line_item(&assignment, Some(&link), "Originality").await;

    let req = test::TestRequest::delete()
        .uri(&line_item_path(course.id, extra.id))
        .insert_header(ctx.write_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(content_type(&resp), LINE_ITEM_MIME_TYPE);
    assert!(
        ctx.storage
            .get_line_item_by_id(extra.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[actix_web::test]
async fn test_destroy_uncoupled_line_item() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;
    let assignment = ctx.assignment(&course, "Lab Report").await;
    let item = ctx.line_item(&assignment, None, "Lab Report").await;

    let req = test::TestRequest::delete()
        .uri(&line_item_path(course.id, item.id))
        .insert_header(ctx.write_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(
        ctx.storage
            .get_line_item_by_id(item.id)
            .await
            .unwrap()
            .is_none()
    );
}

// ---------------------------------------------------------------------------
// index
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_index_filters_and_paging() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;
    let other = ctx.course("History").await;
    let assignment = ctx.assignment(&course, "Lab Report").await;
    let link = ctx.resource_link(&assignment.lti_context_id).await;
    ctx.line_item(&assignment, Some(&link), "Lab Report").await;
    ctx.line_item(&assignment, None, "Participation").await;
    ctx.line_item(&assignment, None, "Attendance").await;
    let other_assignment = ctx.assignment(&other, "Essay").await;
    ctx.line_item(&other_assignment, None, "Essay").await;

    // 第一页
    let req = test::TestRequest::get()
        .uri(&format!("{}?limit=2", line_items_path(course.id)))
        .insert_header(ctx.read_only_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), LINE_ITEM_CONTAINER_MIME_TYPE);
    let link_header = resp
        .headers()
        .get(LINK)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(link_header.contains("page=2&limit=2>; rel=\"next\""));
    assert!(link_header.contains("page=2&limit=2>; rel=\"last\""));
    let body: Value = test::read_body_json(resp).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["label"], "Lab Report");
    assert_eq!(items[1]["label"], "Participation");

    // 第二页
    let req = test::TestRequest::get()
        .uri(&format!("{}?limit=2&page=2", line_items_path(course.id)))
        .insert_header(ctx.read_only_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let link_header = resp.headers().get(LINK).unwrap().to_str().unwrap();
    assert!(!link_header.contains("rel=\"next\""));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // 按 LTI link ID 筛选
    let req = test::TestRequest::get()
        .uri(&format!(
            "{}?lti_link_id={}",
            line_items_path(course.id),
            assignment.lti_context_id
        ))
        .insert_header(ctx.read_only_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["ltiLinkId"], json!(assignment.lti_context_id));

    // 未知 LTI link ID 返回空列表
    let req = test::TestRequest::get()
        .uri(&format!("{}?lti_link_id=unknown", line_items_path(course.id)))
        .insert_header(ctx.read_only_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_index_filters_by_tag_and_resource_id() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;

    for (label, tag, resource_id) in [
        ("Quiz 1", "quiz", "r-1"),
        ("Quiz 2", "quiz", "r-2"),
        ("Final", "exam", "r-1"),
    ] {
        let req = test::TestRequest::post()
            .uri(&line_items_path(course.id))
            .insert_header(ctx.write_auth())
            .set_json(json!({
                "scoreMaximum": 10,
                "label": label,
                "tag": tag,
                "resourceId": resource_id,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri(&format!("{}?tag=quiz", line_items_path(course.id)))
        .insert_header(ctx.read_only_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let link_header = resp.headers().get(LINK).unwrap().to_str().unwrap();
    assert!(link_header.contains("?tag=quiz&page=1"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri(&format!("{}?resource_id=r-1&tag=exam", line_items_path(course.id)))
        .insert_header(ctx.read_only_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["label"], "Final");
}

#[actix_web::test]
async fn test_index_page_beyond_range_is_empty() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;
    let assignment = ctx.assignment(&course, "Lab Report").await;
    ctx.line_item(&assignment, None, "Lab Report").await;

    let req = test::TestRequest::get()
        .uri(&format!(
            "{}?page=9223372036854775807",
            line_items_path(course.id)
        ))
        .insert_header(ctx.read_only_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), LINE_ITEM_CONTAINER_MIME_TYPE);
    let link_header = resp.headers().get(LINK).unwrap().to_str().unwrap();
    assert!(!link_header.contains("rel=\"next\""));
    let body: Value = test::read_body_json(resp).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_index_with_malformed_query_is_bad_request() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;

    let req = test::TestRequest::get()
        .uri(&format!("{}?page=abc", line_items_path(course.id)))
        .insert_header(ctx.read_only_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(content_type(&resp), LINE_ITEM_MIME_TYPE);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["message"].as_str().is_some());
}

// ---------------------------------------------------------------------------
// authentication
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_missing_token_is_unauthorized() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;

    let req = test::TestRequest::get()
        .uri(&line_items_path(course.id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(content_type(&resp), LINE_ITEM_MIME_TYPE);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["message"].is_string());
}

#[actix_web::test]
async fn test_invalid_token_is_unauthorized() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;

    let req = test::TestRequest::get()
        .uri(&line_items_path(course.id))
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_read_only_scope_cannot_write() {
    let ctx = TestContext::new().await;
    let app = lti_app!(ctx);
    let course = ctx.course("Biology").await;

    let req = test::TestRequest::post()
        .uri(&line_items_path(course.id))
        .insert_header(ctx.read_only_auth())
        .set_json(json!({"scoreMaximum": 10, "label": "Quiz"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(ctx.storage.count_line_items().await.unwrap(), 0);

    // 只读权限可以读取
    let req = test::TestRequest::get()
        .uri(&line_items_path(course.id))
        .insert_header(ctx.read_only_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
