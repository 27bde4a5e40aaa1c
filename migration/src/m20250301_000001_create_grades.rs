use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建成绩记录表（seq 决定创建顺序，id 为对外标识符）
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Seq)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Grades::Id)
                            .string_len(24)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Grades::LearnerId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Grades::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建分数条目表（按 position 保持追加顺序）
        manager
            .create_table(
                Table::create()
                    .table(GradeScores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradeScores::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GradeScores::GradeId).string_len(24).not_null())
                    .col(ColumnDef::new(GradeScores::Position).big_integer().not_null())
                    .col(ColumnDef::new(GradeScores::ScoreType).string().not_null())
                    .col(ColumnDef::new(GradeScores::Score).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradeScores::Table, GradeScores::GradeId)
                            .to(Grades::Table, Grades::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 单字段索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_class_id")
                    .table(Grades::Table)
                    .col(Grades::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_learner_id")
                    .table(Grades::Table)
                    .col(Grades::LearnerId)
                    .to_owned(),
            )
            .await?;

        // 复合索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_learner_class")
                    .table(Grades::Table)
                    .col(Grades::LearnerId)
                    .col(Grades::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grade_scores_grade_position")
                    .table(GradeScores::Table)
                    .col(GradeScores::GradeId)
                    .col(GradeScores::Position)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(GradeScores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    Seq,
    Id,
    LearnerId,
    ClassId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GradeScores {
    #[sea_orm(iden = "grade_scores")]
    Table,
    Id,
    GradeId,
    Position,
    ScoreType,
    Score,
}
