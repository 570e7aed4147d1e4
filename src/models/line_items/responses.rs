use serde::{Deserialize, Serialize};

use super::entities::LineItem;
use crate::models::PaginationInfo;

/// 成绩项对外序列化格式
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    // 成绩项的绝对 URL
    pub id: String,
    pub score_maximum: f64,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    // 仅耦合模型下存在
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lti_link_id: Option<String>,
}

impl LineItemResponse {
    pub fn from_line_item(item: LineItem, url: String) -> Self {
        Self {
            id: url,
            score_maximum: item.score_maximum,
            label: item.label,
            resource_id: item.resource_id,
            tag: item.tag,
            lti_link_id: item.lti_link_id,
        }
    }
}

/// 成绩项分页列表（存储层输出）
#[derive(Debug, Clone)]
pub struct LineItemListResponse {
    pub items: Vec<LineItem>,
    pub pagination: PaginationInfo,
}
