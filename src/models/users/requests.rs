use super::entities::UserRole;
use serde::Deserialize;
use ts_rs::TS;

// 用户创建请求（目前只由种子数据使用，没有对外的注册接口）
//
// password 字段在进入存储层之前必须已经是 argon2 哈希。
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: UserRole,
}
