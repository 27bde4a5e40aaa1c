use actix_web::{HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::ApiResponse;
use crate::models::grades::responses::ClassStatsResponse;
use crate::services::error_response;
use crate::services::grades_agg::compute::class_learner_stats;
use crate::storage::GradeFilter;

pub async fn class_stats(service: &GradeService, class_id: i64) -> ActixResult<HttpResponse> {
    let storage = service.get_storage();

    let records = match storage.find_grades(GradeFilter::by_class(class_id, None)).await {
        Ok(records) => records,
        Err(e) => return Ok(error_response(&e, "Class stats")),
    };

    let response = ClassStatsResponse {
        class_id,
        items: class_learner_stats(&records),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Class stats retrieved successfully")))
}
