use actix_web::{HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::errors::GradebookError;
use crate::models::ApiResponse;
use crate::services::error_response;
use crate::storage::GradeFilter;

pub async fn get_grade(service: &GradeService, id: &str) -> ActixResult<HttpResponse> {
    let storage = service.get_storage();

    // ID 格式不合法时不访问存储
    let filter = match GradeFilter::by_id(id) {
        Ok(filter) => filter,
        Err(e) => return Ok(error_response(&e, "Get grade record")),
    };

    match storage.find_grade(filter).await {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Grade record retrieved successfully",
        ))),
        Ok(None) => Ok(error_response(
            &GradebookError::not_found("Grade record not found"),
            "Get grade record",
        )),
        Err(e) => Ok(error_response(&e, "Get grade record")),
    }
}
