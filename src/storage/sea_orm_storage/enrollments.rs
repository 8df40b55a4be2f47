//! 选课存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::errors::{Result, SMSystemError};
use crate::models::enrollments::{
    entities::{Enrollment, EnrollmentStatus},
    requests::CreateEnrollmentRequest,
};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建选课记录
    ///
    /// (student_id, course_id) 唯一冲突由 From<DbErr> 归类为 UniqueViolation；
    /// 学生或课程不存在时触发外键约束，归类为普通数据库操作错误。
    pub async fn create_enrollment_impl(
        &self,
        req: CreateEnrollmentRequest,
    ) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            grade: Set(req.grade),
            status: Set(req.status.unwrap_or(EnrollmentStatus::Active).to_string()),
            enrollment_date: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into_enrollment())
    }

    /// 列出全部选课记录，按选课时间倒序（同秒内按 ID 倒序保证稳定）
    pub async fn list_enrollments_impl(&self) -> Result<Vec<Enrollment>> {
        let enrollments = Enrollments::find()
            .order_by_desc(Column::EnrollmentDate)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SMSystemError::database_operation(format!("查询选课列表失败: {e}")))?;

        Ok(enrollments
            .into_iter()
            .map(|m| m.into_enrollment())
            .collect())
    }

    /// 选课记录总数
    pub async fn count_enrollments_impl(&self) -> Result<u64> {
        Enrollments::find()
            .count(&self.db)
            .await
            .map_err(|e| SMSystemError::database_operation(format!("查询选课总数失败: {e}")))
    }
}
