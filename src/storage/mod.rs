use std::sync::Arc;

use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    courses::{
        entities::{Course, CourseWorkflowState},
        requests::CreateCourseRequest,
    },
    line_items::{
        entities::LineItem,
        requests::{LineItemChanges, LineItemListQuery, NewLineItem},
        responses::LineItemListResponse,
    },
    resource_links::{entities::ResourceLink, requests::CreateResourceLinkRequest},
};

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 更新课程工作流状态（如结课）
    async fn update_course_workflow_state(
        &self,
        course_id: i64,
        state: CourseWorkflowState,
    ) -> Result<Option<Course>>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment>;
    // 通过ID获取作业信息
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 统计作业数量，可按课程筛选
    async fn count_assignments(&self, course_id: Option<i64>) -> Result<u64>;

    /// 资源链接管理方法
    // 创建资源链接
    async fn create_resource_link(&self, link: CreateResourceLinkRequest) -> Result<ResourceLink>;
    // 通过 LTI link ID 获取资源链接
    async fn get_resource_link_by_lti_id(
        &self,
        resource_link_id: &str,
    ) -> Result<Option<ResourceLink>>;

    /// 成绩项管理方法
    // 创建成绩项（作业须已存在）
    async fn create_line_item(&self, item: NewLineItem) -> Result<LineItem>;
    // 在同一事务中创建作业与成绩项（非耦合模型）
    async fn create_line_item_with_assignment(
        &self,
        assignment: CreateAssignmentRequest,
        item: NewLineItem,
    ) -> Result<(Assignment, LineItem)>;
    // 通过ID获取成绩项
    async fn get_line_item_by_id(&self, line_item_id: i64) -> Result<Option<LineItem>>;
    // 获取属于指定课程的成绩项
    async fn get_line_item_in_course(
        &self,
        course_id: i64,
        line_item_id: i64,
    ) -> Result<Option<LineItem>>;
    // 获取资源链接下最早创建的成绩项
    async fn first_line_item_for_resource_link(
        &self,
        resource_link_pk: i64,
    ) -> Result<Option<LineItem>>;
    // 获取作业 + 资源链接组合下的默认成绩项 ID
    async fn default_line_item_id(
        &self,
        assignment_id: i64,
        resource_link_pk: i64,
    ) -> Result<Option<i64>>;
    // 更新成绩项，rename_assignment 为 true 时同步修改作业名称
    async fn update_line_item(
        &self,
        line_item_id: i64,
        changes: LineItemChanges,
        rename_assignment: bool,
    ) -> Result<Option<LineItem>>;
    // 删除成绩项
    async fn delete_line_item(&self, line_item_id: i64) -> Result<bool>;
    // 分页列出课程下的成绩项
    async fn list_line_items_with_pagination(
        &self,
        query: LineItemListQuery,
    ) -> Result<LineItemListResponse>;
    // 统计成绩项数量
    async fn count_line_items(&self) -> Result<u64>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
