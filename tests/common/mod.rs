#![allow(dead_code)]

use std::sync::Arc;

use lti_line_items::config::DatabaseConfig;
use lti_line_items::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    courses::{
        entities::{Course, CourseWorkflowState},
        requests::CreateCourseRequest,
    },
    line_items::{entities::LineItem, requests::NewLineItem},
    resource_links::{entities::ResourceLink, requests::CreateResourceLinkRequest},
};
use lti_line_items::storage::{Storage, create_storage};
use lti_line_items::utils::jwt::{LINE_ITEM_READONLY_SCOPE, LINE_ITEM_SCOPE, LtiTokenKeys};

pub const TEST_SECRET: &str = "line-item-test-secret";

/// 构建挂载成绩项路由的测试服务
macro_rules! lti_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(
                    actix_web::web::QueryConfig::default()
                        .error_handler(lti_line_items::utils::query_error_handler),
                )
                .app_data(actix_web::web::Data::new($ctx.storage.clone()))
                .app_data(actix_web::web::Data::new($ctx.keys.clone()))
                .configure(lti_line_items::routes::configure_line_item_routes),
        )
        .await
    };
}

pub struct TestContext {
    pub storage: Arc<dyn Storage>,
    pub keys: LtiTokenKeys,
}

impl TestContext {
    pub async fn new() -> Self {
        let storage = create_storage(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        })
        .await
        .expect("in-memory storage");

        Self {
            storage,
            keys: LtiTokenKeys::new(TEST_SECRET, 0),
        }
    }

    pub fn token(&self, scopes: &[&str]) -> String {
        self.keys
            .issue_token("test-tool", scopes, chrono::Duration::minutes(5))
            .expect("issue token")
    }

    /// `Authorization` 头，具有读写权限
    pub fn write_auth(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token(&[LINE_ITEM_SCOPE])))
    }

    /// `Authorization` 头，仅有只读权限
    pub fn read_only_auth(&self) -> (&'static str, String) {
        (
            "Authorization",
            format!("Bearer {}", self.token(&[LINE_ITEM_READONLY_SCOPE])),
        )
    }

    pub async fn course(&self, name: &str) -> Course {
        self.storage
            .create_course(CreateCourseRequest {
                name: name.to_string(),
                workflow_state: None,
            })
            .await
            .unwrap()
    }

    pub async fn conclude(&self, course: &Course) {
        self.storage
            .update_course_workflow_state(course.id, CourseWorkflowState::Completed)
            .await
            .unwrap();
    }

    pub async fn assignment(&self, course: &Course, name: &str) -> Assignment {
        self.storage
            .create_assignment(CreateAssignmentRequest {
                course_id: course.id,
                name: name.to_string(),
                points_possible: Some(10.0),
                submission_types: "external_tool".to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn resource_link(&self, resource_link_id: &str) -> ResourceLink {
        self.storage
            .create_resource_link(CreateResourceLinkRequest {
                resource_link_id: resource_link_id.to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn line_item(
        &self,
        assignment: &Assignment,
        link: Option<&ResourceLink>,
        label: &str,
    ) -> LineItem {
        self.storage
            .create_line_item(NewLineItem {
                assignment_id: assignment.id,
                resource_link_id: link.map(|l| l.id),
                score_maximum: 10.0,
                label: label.to_string(),
                resource_id: None,
                tag: None,
            })
            .await
            .unwrap()
    }

    pub async fn assignment_name(&self, assignment_id: i64) -> String {
        self.storage
            .get_assignment_by_id(assignment_id)
            .await
            .unwrap()
            .expect("assignment exists")
            .name
    }
}

pub fn line_items_path(course_id: i64) -> String {
    format!("/api/lti/courses/{course_id}/line_items")
}

pub fn line_item_path(course_id: i64, line_item_id: i64) -> String {
    format!("/api/lti/courses/{course_id}/line_items/{line_item_id}")
}

/// 从响应中的 id URL 解析出成绩项 ID
pub fn id_from_url(url: &str) -> i64 {
    url.rsplit('/').next().unwrap().parse().unwrap()
}
