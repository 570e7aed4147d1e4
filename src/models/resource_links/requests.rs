use serde::Deserialize;

/// 创建资源链接请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResourceLinkRequest {
    pub resource_link_id: String,
}
