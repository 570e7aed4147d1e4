//! 资源链接存储操作

use super::{SeaOrmStorage, now_timestamp};
use crate::entity::prelude::ResourceLinks;
use crate::entity::resource_links::{ActiveModel, Column};
use crate::errors::{LtiServiceError, Result};
use crate::models::resource_links::{
    entities::ResourceLink, requests::CreateResourceLinkRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建资源链接
    pub async fn create_resource_link_impl(
        &self,
        req: CreateResourceLinkRequest,
    ) -> Result<ResourceLink> {
        let now = now_timestamp();

        let model = ActiveModel {
            resource_link_id: Set(req.resource_link_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            LtiServiceError::database_operation(format!("创建资源链接失败: {e}"))
        })?;

        Ok(result.into_resource_link())
    }

    /// 通过 LTI link ID 获取资源链接
    pub async fn get_resource_link_by_lti_id_impl(
        &self,
        resource_link_id: &str,
    ) -> Result<Option<ResourceLink>> {
        let result = ResourceLinks::find()
            .filter(Column::ResourceLinkId.eq(resource_link_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                LtiServiceError::database_operation(format!("查询资源链接失败: {e}"))
            })?;

        Ok(result.map(|m| m.into_resource_link()))
    }
}
