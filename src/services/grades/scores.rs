use actix_web::{HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::grades::entities::{RecordId, ScoreEntry};
use crate::errors::GradebookError;
use crate::models::ApiResponse;
use crate::services::error_response;

pub async fn add_score(
    service: &GradeService,
    id: &str,
    entry: ScoreEntry,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage();

    let id = match RecordId::parse(id) {
        Ok(id) => id,
        Err(e) => return Ok(error_response(&e, "Add score")),
    };

    match storage.push_score(&id, entry).await {
        Ok(result) if result.matched_count == 0 => Ok(error_response(
            &GradebookError::not_found("Grade record not found"),
            "Add score",
        )),
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Score added successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Add score")),
    }
}

pub async fn remove_score(
    service: &GradeService,
    id: &str,
    entry: ScoreEntry,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage();

    let id = match RecordId::parse(id) {
        Ok(id) => id,
        Err(e) => return Ok(error_response(&e, "Remove score")),
    };

    // 只移除第一个相同的条目
    match storage.pull_score(&id, &entry).await {
        Ok(result) if result.matched_count == 0 => Ok(error_response(
            &GradebookError::not_found("Grade record not found"),
            "Remove score",
        )),
        Ok(result) if result.modified_count == 0 => Ok(error_response(
            &GradebookError::not_found("Score entry not found"),
            "Remove score",
        )),
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Score removed successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Remove score")),
    }
}
