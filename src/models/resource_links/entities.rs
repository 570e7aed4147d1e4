use serde::{Deserialize, Serialize};

/// LTI 资源链接：外部工具在课程中的一次放置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLink {
    pub id: i64,
    // 对外暴露的 LTI link ID
    pub resource_link_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
