use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    // 唯一 ID
    pub id: i64,
    // 所属作业 ID
    pub assignment_id: i64,
    // 关联的资源链接主键（非耦合模型下为空）
    pub resource_link_id: Option<i64>,
    // 关联资源链接的 LTI link ID
    pub lti_link_id: Option<String>,
    // 满分
    pub score_maximum: f64,
    // 标签
    pub label: String,
    // 工具侧资源标识
    pub resource_id: Option<String>,
    // 工具自定义标签
    pub tag: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl LineItem {
    /// 是否与资源链接耦合
    pub fn is_coupled(&self) -> bool {
        self.resource_link_id.is_some()
    }
}
