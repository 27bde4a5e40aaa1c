//! 请求参数解析错误处理
//!
//! 将 actix 提取器的解析失败统一转换为 400 + ApiResponse。

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

fn bad_request<E>(err: E, message: String, req: &HttpRequest) -> Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    debug!("Rejected request {} {}: {}", req.method(), req.path(), message);
    InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    let message = format!("Invalid request body: {err}");
    bad_request(err, message, req)
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    let message = format!("Invalid query parameters: {err}");
    bad_request(err, message, req)
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    let message = format!("Invalid path parameter: {err}");
    bad_request(err, message, req)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    #[test]
    fn test_json_error_is_bad_request() {
        let req = TestRequest::default().to_http_request();
        let err = json_error_handler(JsonPayloadError::ContentType, &req);
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }
}
