use serde::{Deserialize, Serialize};

// 不需要学生提交的作业（由外部工具回传成绩）
pub const SUBMISSION_TYPES_NONE: &str = "none";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 所属课程 ID
    pub course_id: i64,
    // 作业名称
    pub name: String,
    // 满分
    pub points_possible: Option<f64>,
    // 提交方式
    pub submission_types: String,
    // LTI 上下文标识（UUID）
    pub lti_context_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
