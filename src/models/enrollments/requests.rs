use super::entities::EnrollmentStatus;
use serde::Deserialize;
use ts_rs::TS;

// 选课创建请求
//
// status 缺省为 active，enrollmentDate 由服务端取当前时间。
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct CreateEnrollmentRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub grade: Option<String>,
    pub status: Option<EnrollmentStatus>,
}
