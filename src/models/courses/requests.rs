use serde::Deserialize;

use super::entities::CourseWorkflowState;

/// 创建课程请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub name: String,
    pub workflow_state: Option<CourseWorkflowState>, // 默认为 available
}
