pub mod auth;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod students;
pub mod users;

pub use common::response::ErrorResponse;

// 程序启动时间，用于统计预处理耗时
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
