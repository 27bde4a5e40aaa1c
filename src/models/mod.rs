pub mod common;
pub mod grades;
pub mod grades_agg;

pub use common::ApiResponse;

/// 业务错误码（随 ApiResponse 返回）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 请求错误
    BadRequest = 1000,
    InvalidIdentifier = 1001,
    ValidationFailed = 1002,

    // 资源不存在
    NotFound = 2000,

    // 服务端错误
    InternalServerError = 5000,
}
