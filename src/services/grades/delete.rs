use actix_web::{HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::errors::GradebookError;
use crate::models::ApiResponse;
use crate::services::error_response;
use crate::storage::GradeFilter;

pub async fn delete_grade(service: &GradeService, id: &str) -> ActixResult<HttpResponse> {
    let filter = match GradeFilter::by_id(id) {
        Ok(filter) => filter,
        Err(e) => return Ok(error_response(&e, "Delete grade record")),
    };

    let storage = service.get_storage();
    respond(storage.delete_grade(filter).await, "Delete grade record")
}

pub async fn delete_by_learner(
    service: &GradeService,
    learner_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage();
    respond(
        storage
            .delete_grades(GradeFilter::by_learner(learner_id, None))
            .await,
        "Delete learner grade records",
    )
}

pub async fn delete_by_class(service: &GradeService, class_id: i64) -> ActixResult<HttpResponse> {
    let storage = service.get_storage();
    respond(
        storage
            .delete_grades(GradeFilter::by_class(class_id, None))
            .await,
        "Delete class grade records",
    )
}

fn respond(
    result: crate::errors::Result<crate::models::grades::responses::DeleteResult>,
    action: &str,
) -> ActixResult<HttpResponse> {
    match result {
        Ok(deleted) if deleted.deleted_count == 0 => Ok(error_response(
            &GradebookError::not_found("No matching grade records"),
            action,
        )),
        Ok(deleted) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            deleted,
            "Grade records deleted successfully",
        ))),
        Err(e) => Ok(error_response(&e, action)),
    }
}
