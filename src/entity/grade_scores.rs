//! 分数条目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grade_scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub grade_id: String,
    pub position: i64,
    pub score_type: String,
    #[sea_orm(column_type = "Double")]
    pub score: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::grades::Entity",
        from = "Column::GradeId",
        to = "super::grades::Column::Id",
        on_delete = "Cascade"
    )]
    Grade,
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grade.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_score_entry(self) -> crate::models::grades::entities::ScoreEntry {
        use crate::models::grades::entities::{ScoreEntry, ScoreType};

        ScoreEntry::new(ScoreType::from(self.score_type), self.score)
    }

    /// 与请求中的分数条目逐字段比较
    pub fn matches(&self, entry: &crate::models::grades::entities::ScoreEntry) -> bool {
        self.score_type == entry.score_type.as_str() && self.score == entry.score
    }
}
