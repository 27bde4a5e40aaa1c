use actix_web::{HttpResponse, Result as ActixResult};
use tracing::warn;

use super::GradeService;
use super::create::VALIDATION_WARNING_HEADER;
use crate::errors::GradebookError;
use crate::models::ApiResponse;
use crate::models::grades::entities::check_class_id;
use crate::models::grades::requests::ReassignClassRequest;
use crate::services::error_response;

pub async fn reassign_class(
    service: &GradeService,
    class_id: i64,
    update: ReassignClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage();

    // 目标班级超出范围时仅警告，更新照常执行
    let warning = check_class_id(update.class_id);
    if let Some(warning) = &warning {
        warn!(
            "Reassigning class {} to out-of-range class: {}",
            class_id, warning
        );
    }

    match storage.reassign_class(class_id, update.class_id).await {
        Ok(result) if result.matched_count == 0 => Ok(error_response(
            &GradebookError::not_found(format!("No grade records in class {class_id}")),
            "Reassign class",
        )),
        Ok(result) => {
            let mut response = HttpResponse::Ok();
            if let Some(warning) = &warning {
                response.append_header((VALIDATION_WARNING_HEADER, warning.to_string()));
            }
            Ok(response.json(ApiResponse::success(
                result,
                "Class reassigned successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, "Reassign class")),
    }
}
