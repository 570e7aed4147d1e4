//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod courses;
mod line_items;
mod resource_links;

use crate::config::DatabaseConfig;
use crate::errors::{LtiServiceError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| LtiServiceError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        // 内存数据库只存在于单个连接中，必须固定为一个永不回收的连接
        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LtiServiceError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory")
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| {
                LtiServiceError::database_connection(format!("SQLite 连接失败: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| LtiServiceError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LtiServiceError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 当前时间戳（秒）
pub(crate) fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

// Storage trait 实现
use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    courses::{
        entities::{Course, CourseWorkflowState},
        requests::CreateCourseRequest,
    },
    line_items::{
        entities::LineItem,
        requests::{LineItemChanges, LineItemListQuery, NewLineItem},
        responses::LineItemListResponse,
    },
    resource_links::{entities::ResourceLink, requests::CreateResourceLinkRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn update_course_workflow_state(
        &self,
        course_id: i64,
        state: CourseWorkflowState,
    ) -> Result<Option<Course>> {
        self.update_course_workflow_state_impl(course_id, state)
            .await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn count_assignments(&self, course_id: Option<i64>) -> Result<u64> {
        self.count_assignments_impl(course_id).await
    }

    // 资源链接模块
    async fn create_resource_link(&self, link: CreateResourceLinkRequest) -> Result<ResourceLink> {
        self.create_resource_link_impl(link).await
    }

    async fn get_resource_link_by_lti_id(
        &self,
        resource_link_id: &str,
    ) -> Result<Option<ResourceLink>> {
        self.get_resource_link_by_lti_id_impl(resource_link_id)
            .await
    }

    // 成绩项模块
    async fn create_line_item(&self, item: NewLineItem) -> Result<LineItem> {
        self.create_line_item_impl(item).await
    }

    async fn create_line_item_with_assignment(
        &self,
        assignment: CreateAssignmentRequest,
        item: NewLineItem,
    ) -> Result<(Assignment, LineItem)> {
        self.create_line_item_with_assignment_impl(assignment, item)
            .await
    }

    async fn get_line_item_by_id(&self, line_item_id: i64) -> Result<Option<LineItem>> {
        self.get_line_item_by_id_impl(line_item_id).await
    }

    async fn get_line_item_in_course(
        &self,
        course_id: i64,
        line_item_id: i64,
    ) -> Result<Option<LineItem>> {
        self.get_line_item_in_course_impl(course_id, line_item_id)
            .await
    }

    async fn first_line_item_for_resource_link(
        &self,
        resource_link_pk: i64,
    ) -> Result<Option<LineItem>> {
        self.first_line_item_for_resource_link_impl(resource_link_pk)
            .await
    }

    async fn default_line_item_id(
        &self,
        assignment_id: i64,
        resource_link_pk: i64,
    ) -> Result<Option<i64>> {
        self.default_line_item_id_impl(assignment_id, resource_link_pk)
            .await
    }

    async fn update_line_item(
        &self,
        line_item_id: i64,
        changes: LineItemChanges,
        rename_assignment: bool,
    ) -> Result<Option<LineItem>> {
        self.update_line_item_impl(line_item_id, changes, rename_assignment)
            .await
    }

    async fn delete_line_item(&self, line_item_id: i64) -> Result<bool> {
        self.delete_line_item_impl(line_item_id).await
    }

    async fn list_line_items_with_pagination(
        &self,
        query: LineItemListQuery,
    ) -> Result<LineItemListResponse> {
        self.list_line_items_with_pagination_impl(query).await
    }

    async fn count_line_items(&self) -> Result<u64> {
        self.count_line_items_impl().await
    }
}
