//! LTI 成绩项实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lti_line_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub lti_resource_link_id: Option<i64>,
    pub score_maximum: f64,
    pub label: String,
    pub resource_id: Option<String>,
    pub tag: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::resource_links::Entity",
        from = "Column::LtiResourceLinkId",
        to = "super::resource_links::Column::Id"
    )]
    ResourceLink,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::resource_links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResourceLink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
//
// `lti_link_id` 是关联资源链接的对外标识（resource_link_id），由调用方查询后传入。
impl Model {
    pub fn into_line_item(
        self,
        lti_link_id: Option<String>,
    ) -> crate::models::line_items::entities::LineItem {
        use crate::models::line_items::entities::LineItem;
        use chrono::{DateTime, Utc};

        LineItem {
            id: self.id,
            assignment_id: self.assignment_id,
            resource_link_id: self.lti_resource_link_id,
            lti_link_id,
            score_maximum: self.score_maximum,
            label: self.label,
            resource_id: self.resource_id,
            tag: self.tag,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
