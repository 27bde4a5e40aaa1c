use actix_web::{HttpResponse, Result as ActixResult};
use tracing::{debug, warn};

use super::GradeService;
use crate::models::grades::requests::CreateGradeRequest;
use crate::services::error_response;

/// 校验警告通过该响应头返回（可出现多次）
pub const VALIDATION_WARNING_HEADER: &str = "X-Validation-Warning";

pub async fn create_grade(
    service: &GradeService,
    grade: CreateGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage();

    // 数值范围不合法时仅警告，记录照常写入
    let warnings = grade.validate();
    for warning in &warnings {
        warn!(
            "Grade record for learner {} in class {} failed validation: {}",
            grade.learner_id, grade.class_id, warning
        );
    }

    match storage.insert_grade(grade).await {
        Ok(record) => {
            debug!("Grade record {} created", record.id);
            let mut response = HttpResponse::NoContent();
            for warning in &warnings {
                response.append_header((VALIDATION_WARNING_HEADER, warning.to_string()));
            }
            Ok(response.finish())
        }
        Err(e) => Ok(error_response(&e, "Create grade record")),
    }
}
