pub mod grades;
pub mod grades_agg;

pub use grades::GradeService;
pub use grades_agg::GradeAggService;

use actix_web::HttpResponse;
use tracing::error;

use crate::errors::GradebookError;
use crate::models::{ApiResponse, ErrorCode};

/// 将业务错误转换为 HTTP 响应
///
/// 存储层错误只返回通用信息，详细内容写入日志。
pub(crate) fn error_response(err: &GradebookError, action: &str) -> HttpResponse {
    match err {
        GradebookError::InvalidIdentifier(msg) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::InvalidIdentifier, msg.clone()),
        ),
        GradebookError::Validation(msg) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::ValidationFailed, msg.clone()),
        ),
        GradebookError::NotFound(msg) => HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, msg.clone())),
        _ => {
            error!("{} failed: {}", action, err.format_simple());
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal Server Error",
            ))
        }
    }
}
