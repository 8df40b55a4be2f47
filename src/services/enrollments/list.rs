use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EnrollmentService;
use crate::models::ErrorResponse;

pub async fn list_enrollments(
    service: &EnrollmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 返回裸数组，按选课时间倒序
    match storage.list_enrollments().await {
        Ok(enrollments) => Ok(HttpResponse::Ok().json(enrollments)),
        Err(e) => {
            error!("Failed to retrieve enrollment list: {}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse::internal()))
        }
    }
}
