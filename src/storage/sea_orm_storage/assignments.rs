//! 作业存储操作

use super::{SeaOrmStorage, now_timestamp};
use crate::entity::assignments::{ActiveModel, Column};
use crate::entity::prelude::Assignments;
use crate::errors::{LtiServiceError, Result};
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        insert_assignment(&self.db, req).await
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 统计作业数量
    pub async fn count_assignments_impl(&self, course_id: Option<i64>) -> Result<u64> {
        let mut select = Assignments::find();
        if let Some(course_id) = course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        select
            .count(&self.db)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("统计作业数量失败: {e}")))
    }
}

/// 插入作业，可在事务中调用
pub(super) async fn insert_assignment<C>(db: &C, req: CreateAssignmentRequest) -> Result<Assignment>
where
    C: ConnectionTrait,
{
    let now = now_timestamp();

    let model = ActiveModel {
        course_id: Set(req.course_id),
        name: Set(req.name),
        points_possible: Set(req.points_possible),
        submission_types: Set(req.submission_types),
        lti_context_id: Set(uuid::Uuid::new_v4().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = model
        .insert(db)
        .await
        .map_err(|e| LtiServiceError::database_operation(format!("创建作业失败: {e}")))?;

    Ok(result.into_assignment())
}

/// 重命名作业，可在事务中调用
pub(super) async fn rename_assignment<C>(db: &C, assignment_id: i64, name: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let existing = Assignments::find_by_id(assignment_id)
        .one(db)
        .await
        .map_err(|e| LtiServiceError::database_operation(format!("查询作业失败: {e}")))?
        .ok_or_else(|| LtiServiceError::not_found(format!("作业 {assignment_id} 不存在")))?;

    let mut active: ActiveModel = existing.into();
    active.name = Set(name.to_string());
    active.updated_at = Set(now_timestamp());
    active
        .update(db)
        .await
        .map_err(|e| LtiServiceError::database_operation(format!("重命名作业失败: {e}")))?;

    Ok(())
}
