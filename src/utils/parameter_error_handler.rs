//! 请求参数错误处理
//!
//! 把 actix-web 默认的提取器错误统一成 {"error": "..."} 的 400 响应。

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};
use tracing::debug;

use crate::models::ErrorResponse;

/// JSON 请求体解析错误处理器
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("JSON payload error on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest()
        .json(ErrorResponse::new(format!("Invalid request body: {err}")));
    InternalError::from_response(err, response).into()
}

/// 查询参数解析错误处理器
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Query parameter error on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest()
        .json(ErrorResponse::new(format!("Invalid query parameters: {err}")));
    InternalError::from_response(err, response).into()
}
