//! 成绩记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    // 自增序号，决定列表顺序
    #[sea_orm(primary_key)]
    pub seq: i64,
    #[sea_orm(unique)]
    pub id: String,
    pub learner_id: i64,
    pub class_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::grade_scores::Entity")]
    Scores,
}

impl Related<super::grade_scores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_grade_record(
        self,
        scores: Vec<crate::models::grades::entities::ScoreEntry>,
    ) -> crate::models::grades::entities::GradeRecord {
        use crate::models::grades::entities::{GradeRecord, RecordId};

        GradeRecord {
            id: RecordId::from_stored(self.id),
            learner_id: self.learner_id,
            class_id: self.class_id,
            scores,
        }
    }
}
