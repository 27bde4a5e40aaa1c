use actix_web::{HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::ApiResponse;
use crate::models::grades::responses::GradeListResponse;
use crate::services::error_response;
use crate::storage::GradeFilter;

async fn list_with_filter(
    service: &GradeService,
    filter: GradeFilter,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage();

    match storage.find_grades(filter).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeListResponse { items },
            "Grade records retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "List grade records")),
    }
}

pub async fn list_grades(service: &GradeService) -> ActixResult<HttpResponse> {
    list_with_filter(service, GradeFilter::all()).await
}

pub async fn list_by_learner(
    service: &GradeService,
    learner_id: i64,
    class_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    list_with_filter(service, GradeFilter::by_learner(learner_id, class_id)).await
}

pub async fn list_by_class(
    service: &GradeService,
    class_id: i64,
    learner_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    list_with_filter(service, GradeFilter::by_class(class_id, learner_id)).await
}
