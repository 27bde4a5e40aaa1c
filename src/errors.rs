//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_gradebook_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum GradebookError {
            $($variant(String),)*
        }

        impl GradebookError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(GradebookError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(GradebookError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(GradebookError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl GradebookError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        GradebookError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_gradebook_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    StoreFailure("E003", "Store Failure"),
    InvalidIdentifier("E004", "Invalid Identifier"),
    NotFound("E005", "Resource Not Found"),
    Validation("E006", "Validation Error"),
    ComputationUndefined("E007", "Computation Undefined"),
}

impl GradebookError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 终端输出：调试构建使用彩色格式，发布构建使用简洁格式
    pub fn format_terminal(&self) -> String {
        #[cfg(debug_assertions)]
        {
            self.format_colored()
        }
        #[cfg(not(debug_assertions))]
        {
            self.format_simple()
        }
    }
}

impl fmt::Display for GradebookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GradebookError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for GradebookError {
    fn from(err: sea_orm::DbErr) -> Self {
        GradebookError::StoreFailure(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GradebookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GradebookError::database_config("test").code(), "E001");
        assert_eq!(GradebookError::store_failure("test").code(), "E003");
        assert_eq!(GradebookError::invalid_identifier("test").code(), "E004");
        assert_eq!(GradebookError::not_found("test").code(), "E005");
        assert_eq!(GradebookError::computation_undefined("test").code(), "E007");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            GradebookError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            GradebookError::invalid_identifier("test").error_type(),
            "Invalid Identifier"
        );
    }

    #[test]
    fn test_error_message() {
        let err = GradebookError::validation("missing class_id");
        assert_eq!(err.message(), "missing class_id");
    }

    #[test]
    fn test_format_terminal_in_any_profile() {
        let err = GradebookError::database_config("bad url");
        let formatted = err.format_terminal();
        assert!(formatted.contains("Database Configuration Error"));
        assert!(formatted.contains("bad url"));
    }

    #[test]
    fn test_db_err_maps_to_store_failure() {
        let err: GradebookError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("boom"));
    }

    #[test]
    fn test_format_simple() {
        let err = GradebookError::invalid_identifier("xyz");
        let formatted = err.format_simple();
        assert!(formatted.contains("Invalid Identifier"));
        assert!(formatted.contains("xyz"));
    }
}
