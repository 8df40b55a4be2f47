use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生实体
//
// JSON 字段为 camelCase，与前端的数据契约保持一致。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub enrollment_year: Option<i32>,
    pub major: Option<String>,
    // 学籍状态，入库时默认 "active"
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
