use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::WorkflowState).string().not_null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Name).string().not_null())
                    .col(ColumnDef::new(Assignments::PointsPossible).double().null())
                    .col(
                        ColumnDef::new(Assignments::SubmissionTypes)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::LtiContextId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 LTI 资源链接表
        manager
            .create_table(
                Table::create()
                    .table(LtiResourceLinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LtiResourceLinks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LtiResourceLinks::ResourceLinkId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(LtiResourceLinks::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LtiResourceLinks::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 LTI 成绩项表
        manager
            .create_table(
                Table::create()
                    .table(LtiLineItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LtiLineItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LtiLineItems::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LtiLineItems::LtiResourceLinkId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(LtiLineItems::ScoreMaximum)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LtiLineItems::Label).string().not_null())
                    .col(ColumnDef::new(LtiLineItems::ResourceId).string().null())
                    .col(ColumnDef::new(LtiLineItems::Tag).string().null())
                    .col(
                        ColumnDef::new(LtiLineItems::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LtiLineItems::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LtiLineItems::Table, LtiLineItems::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LtiLineItems::Table, LtiLineItems::LtiResourceLinkId)
                            .to(LtiResourceLinks::Table, LtiResourceLinks::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_course_id")
                    .table(Assignments::Table)
                    .col(Assignments::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lti_line_items_assignment_link")
                    .table(LtiLineItems::Table)
                    .col(LtiLineItems::AssignmentId)
                    .col(LtiLineItems::LtiResourceLinkId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lti_line_items_resource_link_id")
                    .table(LtiLineItems::Table)
                    .col(LtiLineItems::LtiResourceLinkId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(LtiLineItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LtiResourceLinks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Name,
    WorkflowState,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    CourseId,
    Name,
    PointsPossible,
    SubmissionTypes,
    LtiContextId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LtiResourceLinks {
    #[sea_orm(iden = "lti_resource_links")]
    Table,
    Id,
    ResourceLinkId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LtiLineItems {
    #[sea_orm(iden = "lti_line_items")]
    Table,
    Id,
    AssignmentId,
    LtiResourceLinkId,
    ScoreMaximum,
    Label,
    ResourceId,
    Tag,
    CreatedAt,
    UpdatedAt,
}
