//! 成绩记录存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::grade_scores::{
    ActiveModel as ScoreActiveModel, Column as ScoreColumn, Entity as GradeScores,
};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades, Model as GradeModel};
use crate::errors::{GradebookError, Result};
use crate::models::grades::{
    entities::{GradeRecord, RecordId, ScoreEntry},
    requests::CreateGradeRequest,
    responses::{DeleteResult, UpdateResult},
};
use crate::storage::GradeFilter;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

// IN 子句单批最多携带的 ID 数
const ID_BATCH_SIZE: usize = 500;

fn score_model(grade_id: &RecordId, position: i64, entry: &ScoreEntry) -> ScoreActiveModel {
    ScoreActiveModel {
        grade_id: Set(grade_id.to_string()),
        position: Set(position),
        score_type: Set(entry.score_type.as_str().to_string()),
        score: Set(entry.score),
        ..Default::default()
    }
}

impl SeaOrmStorage {
    /// 创建成绩记录
    pub async fn insert_grade_impl(&self, req: CreateGradeRequest) -> Result<GradeRecord> {
        let now = chrono::Utc::now().timestamp();
        let id = RecordId::generate();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::store_failure(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            id: Set(id.to_string()),
            learner_id: Set(req.learner_id),
            class_id: Set(req.class_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .insert(&txn)
            .await
            .map_err(|e| GradebookError::store_failure(format!("创建成绩记录失败: {e}")))?;

        if !req.scores.is_empty() {
            let scores = req
                .scores
                .iter()
                .enumerate()
                .map(|(position, entry)| score_model(&id, position as i64, entry));

            GradeScores::insert_many(scores)
                .exec(&txn)
                .await
                .map_err(|e| GradebookError::store_failure(format!("写入分数失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| GradebookError::store_failure(format!("提交事务失败: {e}")))?;

        Ok(GradeRecord {
            id,
            learner_id: req.learner_id,
            class_id: req.class_id,
            scores: req.scores,
        })
    }

    /// 获取第一条匹配的成绩记录
    pub async fn find_grade_impl(&self, filter: GradeFilter) -> Result<Option<GradeRecord>> {
        let model = Grades::find()
            .filter(filter.into_condition())
            .order_by_asc(Column::Seq)
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::store_failure(format!("查询成绩记录失败: {e}")))?;

        match model {
            Some(model) => Ok(self.hydrate(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 列出所有匹配的成绩记录
    pub async fn find_grades_impl(&self, filter: GradeFilter) -> Result<Vec<GradeRecord>> {
        let models = Grades::find()
            .filter(filter.into_condition())
            .order_by_asc(Column::Seq)
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::store_failure(format!("查询成绩记录列表失败: {e}")))?;

        self.hydrate(models).await
    }

    /// 为成绩记录加载分数列表，保持记录顺序和分数追加顺序
    async fn hydrate(&self, models: Vec<GradeModel>) -> Result<Vec<GradeRecord>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
        let mut scores_by_grade: HashMap<String, Vec<ScoreEntry>> = HashMap::new();

        for batch in ids.chunks(ID_BATCH_SIZE) {
            let rows = GradeScores::find()
                .filter(ScoreColumn::GradeId.is_in(batch.iter().map(String::as_str)))
                .order_by_asc(ScoreColumn::GradeId)
                .order_by_asc(ScoreColumn::Position)
                .all(&self.db)
                .await
                .map_err(|e| GradebookError::store_failure(format!("查询分数失败: {e}")))?;

            for row in rows {
                scores_by_grade
                    .entry(row.grade_id.clone())
                    .or_default()
                    .push(row.into_score_entry());
            }
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let scores = scores_by_grade.remove(&model.id).unwrap_or_default();
                model.into_grade_record(scores)
            })
            .collect())
    }

    /// 追加分数条目
    pub async fn push_score_impl(&self, id: &RecordId, entry: ScoreEntry) -> Result<UpdateResult> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::store_failure(format!("开启事务失败: {e}")))?;

        let by_id = Condition::all().add(Column::Id.eq(id.as_str()));
        if Self::lock_grades(&txn, by_id).await? == 0 {
            return Ok(UpdateResult::unmatched());
        }

        let last = GradeScores::find()
            .filter(ScoreColumn::GradeId.eq(id.as_str()))
            .order_by_desc(ScoreColumn::Position)
            .one(&txn)
            .await
            .map_err(|e| GradebookError::store_failure(format!("查询分数失败: {e}")))?;
        let position = last.map_or(0, |row| row.position + 1);

        score_model(id, position, &entry)
            .insert(&txn)
            .await
            .map_err(|e| GradebookError::store_failure(format!("追加分数失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| GradebookError::store_failure(format!("提交事务失败: {e}")))?;

        Ok(UpdateResult::matched(1))
    }

    /// 移除第一个与请求相同的分数条目
    pub async fn pull_score_impl(&self, id: &RecordId, entry: &ScoreEntry) -> Result<UpdateResult> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::store_failure(format!("开启事务失败: {e}")))?;

        let by_id = Condition::all().add(Column::Id.eq(id.as_str()));
        if Self::lock_grades(&txn, by_id).await? == 0 {
            return Ok(UpdateResult::unmatched());
        }

        let rows = GradeScores::find()
            .filter(ScoreColumn::GradeId.eq(id.as_str()))
            .order_by_asc(ScoreColumn::Position)
            .all(&txn)
            .await
            .map_err(|e| GradebookError::store_failure(format!("查询分数失败: {e}")))?;

        // 未提交的事务在 drop 时回滚，updated_at 保持不变
        let Some(target) = rows.into_iter().find(|row| row.matches(entry)) else {
            return Ok(UpdateResult::matched(0));
        };

        GradeScores::delete_by_id(target.id)
            .exec(&txn)
            .await
            .map_err(|e| GradebookError::store_failure(format!("移除分数失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| GradebookError::store_failure(format!("提交事务失败: {e}")))?;

        Ok(UpdateResult::matched(1))
    }

    /// 批量修改班级 ID
    pub async fn reassign_class_impl(
        &self,
        class_id: i64,
        new_class_id: i64,
    ) -> Result<UpdateResult> {
        let now = chrono::Utc::now().timestamp();

        let result = Grades::update_many()
            .col_expr(Column::ClassId, Expr::value(new_class_id))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::ClassId.eq(class_id))
            .exec(&self.db)
            .await
            .map_err(|e| GradebookError::store_failure(format!("修改班级失败: {e}")))?;

        let matched_count = result.rows_affected;
        let modified_count = if class_id == new_class_id {
            0
        } else {
            matched_count
        };

        Ok(UpdateResult {
            matched_count,
            modified_count,
        })
    }

    /// 删除第一条匹配的成绩记录
    pub async fn delete_grade_impl(&self, filter: GradeFilter) -> Result<DeleteResult> {
        let condition = filter.into_condition();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::store_failure(format!("开启事务失败: {e}")))?;

        if Self::lock_grades(&txn, condition.clone()).await? == 0 {
            return Ok(DeleteResult::default());
        }

        let target: Option<String> = Grades::find()
            .filter(condition)
            .order_by_asc(Column::Seq)
            .select_only()
            .column(Column::Id)
            .into_tuple()
            .one(&txn)
            .await
            .map_err(|e| GradebookError::store_failure(format!("查询成绩记录失败: {e}")))?;

        let Some(target) = target else {
            return Ok(DeleteResult::default());
        };

        let deleted_count = Self::delete_by_ids(&txn, &[target]).await?;

        txn.commit()
            .await
            .map_err(|e| GradebookError::store_failure(format!("提交事务失败: {e}")))?;

        Ok(DeleteResult { deleted_count })
    }

    /// 删除所有匹配的成绩记录
    pub async fn delete_grades_impl(&self, filter: GradeFilter) -> Result<DeleteResult> {
        let condition = filter.into_condition();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::store_failure(format!("开启事务失败: {e}")))?;

        if Self::lock_grades(&txn, condition.clone()).await? == 0 {
            return Ok(DeleteResult::default());
        }

        let ids: Vec<String> = Grades::find()
            .filter(condition)
            .select_only()
            .column(Column::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| GradebookError::store_failure(format!("查询成绩记录失败: {e}")))?;

        let deleted_count = Self::delete_by_ids(&txn, &ids).await?;

        txn.commit()
            .await
            .map_err(|e| GradebookError::store_failure(format!("提交事务失败: {e}")))?;

        Ok(DeleteResult { deleted_count })
    }

    /// 删除指定记录及其分数
    async fn delete_by_ids<C: ConnectionTrait>(conn: &C, ids: &[String]) -> Result<u64> {
        let mut deleted = 0;

        for batch in ids.chunks(ID_BATCH_SIZE) {
            GradeScores::delete_many()
                .filter(ScoreColumn::GradeId.is_in(batch.iter().map(String::as_str)))
                .exec(conn)
                .await
                .map_err(|e| GradebookError::store_failure(format!("删除分数失败: {e}")))?;

            let result = Grades::delete_many()
                .filter(Column::Id.is_in(batch.iter().map(String::as_str)))
                .exec(conn)
                .await
                .map_err(|e| GradebookError::store_failure(format!("删除成绩记录失败: {e}")))?;

            deleted += result.rows_affected;
        }

        Ok(deleted)
    }

    /// 刷新匹配记录的 updated_at，返回命中行数
    ///
    /// 必须是事务中的第一条语句：SQLite 在没有读快照时取写锁才会按 busy_timeout 等待，
    /// PostgreSQL/MySQL 则由此获得行锁，同一记录上的并发修改串行执行。
    async fn lock_grades<C: ConnectionTrait>(conn: &C, condition: Condition) -> Result<u64> {
        let result = Grades::update_many()
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(condition)
            .exec(conn)
            .await
            .map_err(|e| GradebookError::store_failure(format!("锁定成绩记录失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
