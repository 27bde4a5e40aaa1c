pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod scores;
pub mod stats;
pub mod update;

use actix_web::{HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades::entities::ScoreEntry;
use crate::models::grades::requests::{CreateGradeRequest, ReassignClassRequest};
use crate::storage::Storage;

pub struct GradeService {
    storage: Arc<dyn Storage>,
}

impl GradeService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn get_storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    // 创建成绩记录
    pub async fn create_grade(&self, grade: CreateGradeRequest) -> ActixResult<HttpResponse> {
        create::create_grade(self, grade).await
    }

    // 根据ID获取成绩记录
    pub async fn get_grade(&self, id: &str) -> ActixResult<HttpResponse> {
        get::get_grade(self, id).await
    }

    // 列出全部成绩记录
    pub async fn list_grades(&self) -> ActixResult<HttpResponse> {
        list::list_grades(self).await
    }

    // 按学生列出成绩记录
    pub async fn list_by_learner(
        &self,
        learner_id: i64,
        class_id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        list::list_by_learner(self, learner_id, class_id).await
    }

    // 按班级列出成绩记录
    pub async fn list_by_class(
        &self,
        class_id: i64,
        learner_id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        list::list_by_class(self, class_id, learner_id).await
    }

    // 追加分数
    pub async fn add_score(&self, id: &str, entry: ScoreEntry) -> ActixResult<HttpResponse> {
        scores::add_score(self, id, entry).await
    }

    // 移除分数
    pub async fn remove_score(&self, id: &str, entry: ScoreEntry) -> ActixResult<HttpResponse> {
        scores::remove_score(self, id, entry).await
    }

    // 删除单条成绩记录
    pub async fn delete_grade(&self, id: &str) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, id).await
    }

    // 删除学生的全部成绩记录
    pub async fn delete_by_learner(&self, learner_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_by_learner(self, learner_id).await
    }

    // 删除班级的全部成绩记录
    pub async fn delete_by_class(&self, class_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_by_class(self, class_id).await
    }

    // 批量修改班级
    pub async fn reassign_class(
        &self,
        class_id: i64,
        update: ReassignClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::reassign_class(self, class_id, update).await
    }

    // 班级内学生分数统计
    pub async fn class_stats(&self, class_id: i64) -> ActixResult<HttpResponse> {
        stats::class_stats(self, class_id).await
    }
}
