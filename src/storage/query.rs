//! 成绩记录查询条件构造
//!
//! 将请求参数转换为存储层过滤条件，不访问数据库。

use sea_orm::{ColumnTrait, Condition};

use crate::entity::grades::Column;
use crate::errors::Result;
use crate::models::grades::entities::RecordId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeFilter {
    pub id: Option<RecordId>,
    pub learner_id: Option<i64>,
    pub class_id: Option<i64>,
}

impl GradeFilter {
    /// 不带任何条件
    pub fn all() -> Self {
        Self::default()
    }

    /// 按记录 ID 精确匹配，ID 格式不合法时返回 InvalidIdentifier
    pub fn by_id(raw: &str) -> Result<Self> {
        Ok(Self::by_record_id(RecordId::parse(raw)?))
    }

    pub fn by_record_id(id: RecordId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// 按学生筛选，可选再按班级细化
    pub fn by_learner(learner_id: i64, class_id: Option<i64>) -> Self {
        Self {
            id: None,
            learner_id: Some(learner_id),
            class_id,
        }
    }

    /// 按班级筛选，可选再按学生细化
    pub fn by_class(class_id: i64, learner_id: Option<i64>) -> Self {
        Self {
            id: None,
            learner_id,
            class_id: Some(class_id),
        }
    }

    /// 转换为 SeaORM 查询条件
    pub fn into_condition(self) -> Condition {
        let mut condition = Condition::all();

        if let Some(id) = self.id {
            condition = condition.add(Column::Id.eq(id.as_str()));
        }

        if let Some(learner_id) = self.learner_id {
            condition = condition.add(Column::LearnerId.eq(learner_id));
        }

        if let Some(class_id) = self.class_id {
            condition = condition.add(Column::ClassId.eq(class_id));
        }

        condition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::grades::Entity as Grades;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn sql(filter: GradeFilter) -> String {
        Grades::find()
            .filter(filter.into_condition())
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn test_by_id_rejects_malformed() {
        let err = GradeFilter::by_id("xyz").unwrap_err();
        assert_eq!(err.code(), "E004");
    }

    #[test]
    fn test_by_id_condition() {
        let filter = GradeFilter::by_id("65a1b2c3d4e5f60718293a4b").unwrap();
        let statement = sql(filter);
        assert!(statement.contains(r#""grades"."id" = '65a1b2c3d4e5f60718293a4b'"#));
        assert!(!statement.contains("learner_id\" ="));
    }

    #[test]
    fn test_by_learner_with_optional_class() {
        let only_learner = sql(GradeFilter::by_learner(7, None));
        assert!(only_learner.contains(r#""grades"."learner_id" = 7"#));
        assert!(!only_learner.contains(r#""grades"."class_id" ="#));

        let refined = sql(GradeFilter::by_learner(7, Some(12)));
        assert!(refined.contains(r#""grades"."learner_id" = 7"#));
        assert!(refined.contains(r#""grades"."class_id" = 12"#));
    }

    #[test]
    fn test_by_class_with_optional_learner() {
        let filter = GradeFilter::by_class(12, Some(7));
        assert_eq!(filter.class_id, Some(12));
        assert_eq!(filter.learner_id, Some(7));
        assert_eq!(filter, GradeFilter::by_learner(7, Some(12)));
    }

    #[test]
    fn test_all_has_no_where_clause() {
        assert!(!sql(GradeFilter::all()).contains("WHERE"));
    }
}
