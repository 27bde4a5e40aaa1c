use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::grades::{
    entities::{GradeRecord, RecordId, ScoreEntry},
    requests::CreateGradeRequest,
    responses::{DeleteResult, UpdateResult},
};

pub mod query;
pub mod sea_orm_storage;

pub use query::GradeFilter;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 成绩记录管理方法
    // 创建成绩记录，分配新 ID
    async fn insert_grade(&self, grade: CreateGradeRequest) -> Result<GradeRecord>;
    // 获取第一条匹配的成绩记录
    async fn find_grade(&self, filter: GradeFilter) -> Result<Option<GradeRecord>>;
    // 列出所有匹配的成绩记录（按创建顺序）
    async fn find_grades(&self, filter: GradeFilter) -> Result<Vec<GradeRecord>>;
    // 删除第一条匹配的成绩记录
    async fn delete_grade(&self, filter: GradeFilter) -> Result<DeleteResult>;
    // 删除所有匹配的成绩记录
    async fn delete_grades(&self, filter: GradeFilter) -> Result<DeleteResult>;
    // 将某班级的所有记录改为新班级
    async fn reassign_class(&self, class_id: i64, new_class_id: i64) -> Result<UpdateResult>;

    /// 分数条目管理方法
    // 追加分数条目
    async fn push_score(&self, id: &RecordId, entry: ScoreEntry) -> Result<UpdateResult>;
    // 移除第一个相同的分数条目
    async fn pull_score(&self, id: &RecordId, entry: &ScoreEntry) -> Result<UpdateResult>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async(config).await?;
    Ok(Arc::new(storage))
}
