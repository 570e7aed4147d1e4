use serde::Deserialize;

/// 创建作业请求（存储层输入）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub course_id: i64,
    pub name: String,
    pub points_possible: Option<f64>,
    pub submission_types: String,
}
