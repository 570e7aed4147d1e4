use serde::Deserialize;

use crate::models::common::pagination::PaginationQuery;

/// 创建成绩项请求（HTTP 请求）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLineItemRequest {
    pub score_maximum: f64,
    pub label: String,
    pub resource_id: Option<String>,
    pub tag: Option<String>,
    // 声明式模型下指定的资源链接
    pub lti_link_id: Option<String>,
}

/// 更新成绩项请求（HTTP 请求），所有字段可选
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLineItemRequest {
    pub score_maximum: Option<f64>,
    pub label: Option<String>,
    pub resource_id: Option<String>,
    pub tag: Option<String>,
    pub lti_link_id: Option<String>,
}

impl UpdateLineItemRequest {
    pub fn into_changes(self) -> LineItemChanges {
        LineItemChanges {
            score_maximum: self.score_maximum,
            label: self.label,
            resource_id: self.resource_id,
            tag: self.tag,
        }
    }
}

/// 成绩项列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize)]
pub struct LineItemListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub tag: Option<String>,
    pub resource_id: Option<String>,
    pub lti_link_id: Option<String>,
}

// 用于存储层的内部参数
#[derive(Debug, Clone)]
pub struct NewLineItem {
    pub assignment_id: i64,
    pub resource_link_id: Option<i64>,
    pub score_maximum: f64,
    pub label: String,
    pub resource_id: Option<String>,
    pub tag: Option<String>,
}

// 用于存储层的内部参数
#[derive(Debug, Clone, Default)]
pub struct LineItemChanges {
    pub score_maximum: Option<f64>,
    pub label: Option<String>,
    pub resource_id: Option<String>,
    pub tag: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct LineItemListQuery {
    pub course_id: i64,
    pub page: i64,
    pub size: i64,
    pub tag: Option<String>,
    pub resource_id: Option<String>,
    pub lti_link_id: Option<String>,
}
