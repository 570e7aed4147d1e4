//! 课程存储操作

use super::{SeaOrmStorage, now_timestamp};
use crate::entity::courses::{ActiveModel, Column};
use crate::entity::prelude::Courses;
use crate::errors::{LtiServiceError, Result};
use crate::models::courses::{
    entities::{Course, CourseWorkflowState},
    requests::CreateCourseRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = now_timestamp();
        let state = req
            .workflow_state
            .unwrap_or(CourseWorkflowState::Available);

        let model = ActiveModel {
            name: Set(req.name),
            workflow_state: Set(state.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::Id.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 更新课程工作流状态
    pub async fn update_course_workflow_state_impl(
        &self,
        course_id: i64,
        state: CourseWorkflowState,
    ) -> Result<Option<Course>> {
        let existing = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("查询课程失败: {e}")))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.workflow_state = Set(state.to_string());
        active.updated_at = Set(now_timestamp());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("更新课程状态失败: {e}")))?;

        Ok(Some(updated.into_course()))
    }
}
