pub mod cohort;
pub mod compute;
pub mod learner;

use actix_web::{HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct GradeAggService {
    storage: Arc<dyn Storage>,
}

impl GradeAggService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn get_storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    // 学生各班级加权平均分
    pub async fn learner_class_averages(&self, learner_id: i64) -> ActixResult<HttpResponse> {
        learner::learner_class_averages(self, learner_id).await
    }

    // 全体及格线统计
    pub async fn cohort_stats(&self) -> ActixResult<HttpResponse> {
        cohort::cohort_stats(self).await
    }
}
