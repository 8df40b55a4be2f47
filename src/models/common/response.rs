use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 统一的错误响应结构
//
// 成功响应直接返回实体或实体数组，错误响应统一为 {"error": "..."}。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// 兜底的 500 响应体，不向客户端泄露内部细节
    pub fn internal() -> Self {
        Self::new("Internal server error")
    }
}
