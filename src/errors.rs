//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 存储层把底层数据库错误归类到这里定义的封闭集合，
//! 服务层只根据错误种类做 HTTP 映射，从不解析数据库的错误文本。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_smsystem_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SMSystemError {
            $($variant(String),)*
        }

        impl SMSystemError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SMSystemError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SMSystemError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SMSystemError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SMSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SMSystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_smsystem_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    UniqueViolation("E004", "Unique Constraint Violation"),
    NotFound("E005", "Resource Not Found"),
    Serialization("E006", "Serialization Error"),
    Authentication("E007", "Authentication Error"),
}

impl SMSystemError {
    /// 是否为唯一约束冲突（对应 HTTP 层的 Conflict 语义）
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, SMSystemError::UniqueViolation(_))
    }

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
}

impl fmt::Display for SMSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SMSystemError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SMSystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 唯一约束冲突单独归类，其余一律视为普通数据库操作错误
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
                SMSystemError::UniqueViolation(msg)
            }
            _ => SMSystemError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for SMSystemError {
    fn from(err: serde_json::Error) -> Self {
        SMSystemError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SMSystemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SMSystemError::database_config("test").code(), "E001");
        assert_eq!(SMSystemError::unique_violation("test").code(), "E004");
        assert_eq!(SMSystemError::authentication("test").code(), "E007");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SMSystemError::database_connection("test").error_type(),
            "Database Connection Error"
        );
        assert_eq!(
            SMSystemError::unique_violation("test").error_type(),
            "Unique Constraint Violation"
        );
    }

    #[test]
    fn test_error_message() {
        let err = SMSystemError::not_found("student 42");
        assert_eq!(err.message(), "student 42");
    }

    #[test]
    fn test_is_unique_violation() {
        assert!(SMSystemError::unique_violation("dup").is_unique_violation());
        assert!(!SMSystemError::database_operation("boom").is_unique_violation());
    }

    #[test]
    fn test_format_simple() {
        let err = SMSystemError::database_operation("insert failed");
        let formatted = err.format_simple();
        assert!(formatted.contains("Database Operation Error"));
        assert!(formatted.contains("insert failed"));
    }
}
