use std::sync::Arc;

use crate::models::{
    courses::{entities::Course, requests::CreateCourseRequest},
    enrollments::{entities::Enrollment, requests::CreateEnrollmentRequest},
    students::{entities::Student, requests::CreateStudentRequest},
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段必须已经是哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 学生管理方法
    // 创建学生
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 列出全部学生，按创建时间倒序
    async fn list_students(&self) -> Result<Vec<Student>>;
    // 学生总数
    async fn count_students(&self) -> Result<u64>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 列出全部课程，按创建时间倒序
    async fn list_courses(&self) -> Result<Vec<Course>>;
    // 课程总数
    async fn count_courses(&self) -> Result<u64>;

    /// 选课管理方法
    // 创建选课记录
    async fn create_enrollment(&self, enrollment: CreateEnrollmentRequest) -> Result<Enrollment>;
    // 列出全部选课记录，按选课时间倒序
    async fn list_enrollments(&self) -> Result<Vec<Enrollment>>;
    // 选课记录总数
    async fn count_enrollments(&self) -> Result<u64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
