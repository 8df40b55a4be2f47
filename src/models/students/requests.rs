use serde::Deserialize;
use ts_rs::TS;

// 学生创建请求
//
// 可选字段缺省即为 null；dateOfBirth 接受 "YYYY-MM-DD"，
// 格式不合法时由 Json 提取器直接以 400 拒绝。
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
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
}
