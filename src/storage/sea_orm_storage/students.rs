//! 学生存储操作

use super::SeaOrmStorage;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, SMSystemError};
use crate::models::students::{entities::Student, requests::CreateStudentRequest};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, Set};

/// 新建学生的默认学籍状态
const DEFAULT_STUDENT_STATUS: &str = "active";

impl SeaOrmStorage {
    /// 创建学生，email 唯一冲突由 From<DbErr> 归类为 UniqueViolation
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            email: Set(req.email),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            phone: Set(req.phone),
            address: Set(req.address),
            city: Set(req.city),
            zip_code: Set(req.zip_code),
            date_of_birth: Set(req
                .date_of_birth
                .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc().timestamp())),
            enrollment_year: Set(req.enrollment_year),
            major: Set(req.major),
            status: Set(DEFAULT_STUDENT_STATUS.to_string()),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into_student())
    }

    /// 列出全部学生，按创建时间倒序（同秒内按 ID 倒序保证稳定）
    pub async fn list_students_impl(&self) -> Result<Vec<Student>> {
        let students = Students::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SMSystemError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 学生总数
    pub async fn count_students_impl(&self) -> Result<u64> {
        Students::find()
            .count(&self.db)
            .await
            .map_err(|e| SMSystemError::database_operation(format!("查询学生总数失败: {e}")))
    }
}
