//! 成绩项存储操作

use std::collections::HashMap;

use super::assignments::{insert_assignment, rename_assignment};
use super::{SeaOrmStorage, now_timestamp};
use crate::entity::assignments::Column as AssignmentColumn;
use crate::entity::line_items::{ActiveModel, Column, Model};
use crate::entity::prelude::{Assignments, LineItems, ResourceLinks};
use crate::entity::resource_links::Column as ResourceLinkColumn;
use crate::errors::{LtiServiceError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    line_items::{
        entities::LineItem,
        requests::{LineItemChanges, LineItemListQuery, NewLineItem},
        responses::LineItemListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建成绩项
    pub async fn create_line_item_impl(&self, item: NewLineItem) -> Result<LineItem> {
        let model = insert_line_item(&self.db, item).await?;
        with_lti_link_id(&self.db, model).await
    }

    /// 在同一事务中创建作业与成绩项
    pub async fn create_line_item_with_assignment_impl(
        &self,
        assignment: CreateAssignmentRequest,
        mut item: NewLineItem,
    ) -> Result<(Assignment, LineItem)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("开启事务失败: {e}")))?;

        let assignment = insert_assignment(&txn, assignment).await?;
        item.assignment_id = assignment.id;
        let model = insert_line_item(&txn, item).await?;

        txn.commit()
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("提交事务失败: {e}")))?;

        let line_item = with_lti_link_id(&self.db, model).await?;
        Ok((assignment, line_item))
    }

    /// 通过 ID 获取成绩项
    pub async fn get_line_item_by_id_impl(&self, line_item_id: i64) -> Result<Option<LineItem>> {
        let result = LineItems::find_by_id(line_item_id)
            .find_also_related(ResourceLinks)
            .one(&self.db)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("查询成绩项失败: {e}")))?;

        Ok(result.map(|(item, link)| item.into_line_item(link.map(|l| l.resource_link_id))))
    }

    /// 获取属于指定课程的成绩项（通过所属作业判断课程归属）
    pub async fn get_line_item_in_course_impl(
        &self,
        course_id: i64,
        line_item_id: i64,
    ) -> Result<Option<LineItem>> {
        let Some(item) = self.get_line_item_by_id_impl(line_item_id).await? else {
            return Ok(None);
        };

        let in_course = Assignments::find()
            .filter(AssignmentColumn::Id.eq(item.assignment_id))
            .filter(AssignmentColumn::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("查询作业失败: {e}")))?;

        Ok((in_course > 0).then_some(item))
    }

    /// 获取资源链接下最早创建的成绩项
    pub async fn first_line_item_for_resource_link_impl(
        &self,
        resource_link_pk: i64,
    ) -> Result<Option<LineItem>> {
        let result = LineItems::find()
            .filter(Column::LtiResourceLinkId.eq(resource_link_pk))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("查询成绩项失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(with_lti_link_id(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    /// 获取作业 + 资源链接组合下最早创建的成绩项 ID（即默认成绩项）
    pub async fn default_line_item_id_impl(
        &self,
        assignment_id: i64,
        resource_link_pk: i64,
    ) -> Result<Option<i64>> {
        let result = LineItems::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::LtiResourceLinkId.eq(resource_link_pk))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| {
                LtiServiceError::database_operation(format!("查询默认成绩项失败: {e}"))
            })?;

        Ok(result.map(|m| m.id))
    }

    /// 更新成绩项，必要时在同一事务中同步作业名称
    pub async fn update_line_item_impl(
        &self,
        line_item_id: i64,
        changes: LineItemChanges,
        rename_assignment_to_label: bool,
    ) -> Result<Option<LineItem>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = LineItems::find_by_id(line_item_id)
            .one(&txn)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("查询成绩项失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let assignment_id = existing.assignment_id;
        let new_label = changes.label.clone();

        let mut active: ActiveModel = existing.into();
        if let Some(score_maximum) = changes.score_maximum {
            active.score_maximum = Set(score_maximum);
        }
        if let Some(label) = changes.label {
            active.label = Set(label);
        }
        if let Some(resource_id) = changes.resource_id {
            active.resource_id = Set(Some(resource_id));
        }
        if let Some(tag) = changes.tag {
            active.tag = Set(Some(tag));
        }
        active.updated_at = Set(now_timestamp());

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("更新成绩项失败: {e}")))?;

        if rename_assignment_to_label && let Some(label) = new_label {
            rename_assignment(&txn, assignment_id, &label).await?;
        }

        txn.commit()
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(with_lti_link_id(&self.db, updated).await?))
    }

    /// 删除成绩项
    pub async fn delete_line_item_impl(&self, line_item_id: i64) -> Result<bool> {
        let result = LineItems::delete_by_id(line_item_id)
            .exec(&self.db)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("删除成绩项失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 分页列出课程下的成绩项
    pub async fn list_line_items_with_pagination_impl(
        &self,
        query: LineItemListQuery,
    ) -> Result<LineItemListResponse> {
        let page = query.page.max(1) as u64;
        let size = query.size.max(1) as u64;

        // 课程下的作业
        let assignment_ids: Vec<i64> = Assignments::find()
            .filter(AssignmentColumn::CourseId.eq(query.course_id))
            .all(&self.db)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("查询课程作业失败: {e}")))?
            .into_iter()
            .map(|a| a.id)
            .collect();

        if assignment_ids.is_empty() {
            return Ok(empty_page(page, size));
        }

        let mut select = LineItems::find().filter(Column::AssignmentId.is_in(assignment_ids));

        if let Some(tag) = query.tag {
            select = select.filter(Column::Tag.eq(tag));
        }

        if let Some(resource_id) = query.resource_id {
            select = select.filter(Column::ResourceId.eq(resource_id));
        }

        // LTI link ID 筛选：未知链接直接返回空页
        if let Some(lti_link_id) = query.lti_link_id {
            let link = ResourceLinks::find()
                .filter(ResourceLinkColumn::ResourceLinkId.eq(lti_link_id))
                .one(&self.db)
                .await
                .map_err(|e| {
                    LtiServiceError::database_operation(format!("查询资源链接失败: {e}"))
                })?;
            match link {
                Some(link) => select = select.filter(Column::LtiResourceLinkId.eq(link.id)),
                None => return Ok(empty_page(page, size)),
            }
        }

        select = select.order_by_asc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            LtiServiceError::database_operation(format!("查询成绩项总数失败: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            LtiServiceError::database_operation(format!("查询成绩项页数失败: {e}"))
        })?;

        // 超出范围的页码直接返回空页，避免偏移量溢出
        if page > pages {
            return Ok(LineItemListResponse {
                items: Vec::new(),
                pagination: PaginationInfo {
                    page: page as i64,
                    page_size: size as i64,
                    total: total as i64,
                    total_pages: pages as i64,
                },
            });
        }

        let models = paginator.fetch_page(page - 1).await.map_err(|e| {
            LtiServiceError::database_operation(format!("查询成绩项列表失败: {e}"))
        })?;

        // 批量查询资源链接，建立 主键 -> LTI link ID 的映射
        let link_pks: Vec<i64> = models
            .iter()
            .filter_map(|m| m.lti_resource_link_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let mut link_map: HashMap<i64, String> = HashMap::new();
        if !link_pks.is_empty() {
            let links = ResourceLinks::find()
                .filter(ResourceLinkColumn::Id.is_in(link_pks))
                .all(&self.db)
                .await
                .map_err(|e| {
                    LtiServiceError::database_operation(format!("查询资源链接失败: {e}"))
                })?;
            link_map = links
                .into_iter()
                .map(|l| (l.id, l.resource_link_id))
                .collect();
        }

        let items = models
            .into_iter()
            .map(|m| {
                let lti_link_id = m
                    .lti_resource_link_id
                    .and_then(|pk| link_map.get(&pk).cloned());
                m.into_line_item(lti_link_id)
            })
            .collect();

        Ok(LineItemListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 统计成绩项数量
    pub async fn count_line_items_impl(&self) -> Result<u64> {
        LineItems::find()
            .count(&self.db)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("统计成绩项数量失败: {e}")))
    }
}

/// 插入成绩项，可在事务中调用
async fn insert_line_item<C>(db: &C, item: NewLineItem) -> Result<Model>
where
    C: ConnectionTrait,
{
    let now = now_timestamp();

    let model = ActiveModel {
        assignment_id: Set(item.assignment_id),
        lti_resource_link_id: Set(item.resource_link_id),
        score_maximum: Set(item.score_maximum),
        label: Set(item.label),
        resource_id: Set(item.resource_id),
        tag: Set(item.tag),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    model
        .insert(db)
        .await
        .map_err(|e| LtiServiceError::database_operation(format!("创建成绩项失败: {e}")))
}

/// 补全资源链接的 LTI link ID 并转换为业务模型
async fn with_lti_link_id<C>(db: &C, model: Model) -> Result<LineItem>
where
    C: ConnectionTrait,
{
    let lti_link_id = match model.lti_resource_link_id {
        Some(pk) => ResourceLinks::find_by_id(pk)
            .one(db)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("查询资源链接失败: {e}")))?
            .map(|l| l.resource_link_id),
        None => None,
    };

    Ok(model.into_line_item(lti_link_id))
}

fn empty_page(page: u64, size: u64) -> LineItemListResponse {
    LineItemListResponse {
        items: Vec::new(),
        pagination: PaginationInfo {
            page: page as i64,
            page_size: size as i64,
            total: 0,
            total_pages: 0,
        },
    }
}
