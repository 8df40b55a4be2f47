//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod enrollments;
mod students;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, SMSystemError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SMSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SMSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SMSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SMSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SMSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    courses::{entities::Course, requests::CreateCourseRequest},
    enrollments::{entities::Enrollment, requests::CreateEnrollmentRequest},
    students::{entities::Student, requests::CreateStudentRequest},
    users::{entities::User, requests::CreateUserRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        self.list_students_impl().await
    }

    async fn count_students(&self) -> Result<u64> {
        self.count_students_impl().await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.list_courses_impl().await
    }

    async fn count_courses(&self) -> Result<u64> {
        self.count_courses_impl().await
    }

    // 选课模块
    async fn create_enrollment(&self, enrollment: CreateEnrollmentRequest) -> Result<Enrollment> {
        self.create_enrollment_impl(enrollment).await
    }

    async fn list_enrollments(&self) -> Result<Vec<Enrollment>> {
        self.list_enrollments_impl().await
    }

    async fn count_enrollments(&self) -> Result<u64> {
        self.count_enrollments_impl().await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::enrollments::entities::EnrollmentStatus;
    use crate::models::users::entities::UserRole;

    /// 基于内存 SQLite 的测试存储
    ///
    /// 连接池固定为单连接：内存数据库是按连接隔离的，
    /// 多连接会让迁移结果对后续查询不可见。
    pub(crate) async fn test_storage() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opt)
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        SeaOrmStorage { db }
    }

    fn student_request(email: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "Student".to_string(),
            phone: None,
            address: None,
            city: None,
            zip_code: None,
            date_of_birth: None,
            enrollment_year: Some(2024),
            major: Some("Computer Science".to_string()),
        }
    }

    fn course_request(code: &str) -> CreateCourseRequest {
        CreateCourseRequest {
            code: code.to_string(),
            title: "Introduction to Programming".to_string(),
            description: None,
            credits: 3,
            semester: 1,
        }
    }

    #[tokio::test]
    async fn test_duplicate_student_email_is_unique_violation() {
        let storage = test_storage().await;

        storage
            .create_student(student_request("dup@student.com"))
            .await
            .expect("first insert succeeds");

        let err = storage
            .create_student(student_request("dup@student.com"))
            .await
            .expect_err("second insert must fail");
        assert!(err.is_unique_violation(), "got: {err}");
    }

    #[tokio::test]
    async fn test_duplicate_course_code_is_unique_violation() {
        let storage = test_storage().await;

        storage
            .create_course(course_request("CS101"))
            .await
            .expect("first insert succeeds");

        let err = storage
            .create_course(course_request("CS101"))
            .await
            .expect_err("second insert must fail");
        assert!(err.is_unique_violation(), "got: {err}");
    }

    #[tokio::test]
    async fn test_duplicate_enrollment_pair_is_unique_violation() {
        let storage = test_storage().await;

        let student = storage
            .create_student(student_request("pair@student.com"))
            .await
            .unwrap();
        let course = storage.create_course(course_request("CS102")).await.unwrap();

        let request = || CreateEnrollmentRequest {
            student_id: student.id,
            course_id: course.id,
            grade: None,
            status: None,
        };

        let enrollment = storage.create_enrollment(request()).await.unwrap();
        // status 缺省为 active
        assert_eq!(enrollment.status, EnrollmentStatus::Active);

        let err = storage
            .create_enrollment(request())
            .await
            .expect_err("duplicate pair must fail");
        assert!(err.is_unique_violation(), "got: {err}");
    }

    #[tokio::test]
    async fn test_lists_are_newest_first() {
        let storage = test_storage().await;

        storage
            .create_student(student_request("first@student.com"))
            .await
            .unwrap();
        let second = storage
            .create_student(student_request("second@student.com"))
            .await
            .unwrap();

        let students = storage.list_students().await.unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].id, second.id);
    }

    #[tokio::test]
    async fn test_counts_track_inserts() {
        let storage = test_storage().await;
        assert_eq!(storage.count_students().await.unwrap(), 0);
        assert_eq!(storage.count_users().await.unwrap(), 0);

        storage
            .create_student(student_request("count@student.com"))
            .await
            .unwrap();
        storage
            .create_user(CreateUserRequest {
                email: "admin@example.com".to_string(),
                name: "Admin User".to_string(),
                password: "hashed".to_string(),
                role: UserRole::Admin,
            })
            .await
            .unwrap();

        assert_eq!(storage.count_students().await.unwrap(), 1);
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_user_by_email() {
        let storage = test_storage().await;
        storage
            .create_user(CreateUserRequest {
                email: "admin@example.com".to_string(),
                name: "Admin User".to_string(),
                password: "hashed".to_string(),
                role: UserRole::Admin,
            })
            .await
            .unwrap();

        let user = storage
            .get_user_by_email("admin@example.com")
            .await
            .unwrap()
            .expect("user exists");
        assert_eq!(user.role, UserRole::Admin);
        assert!(
            storage
                .get_user_by_email("nobody@example.com")
                .await
                .unwrap()
                .is_none()
        );
    }
}
