use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::EnrollmentService;
use crate::errors::SMSystemError;
use crate::middlewares::RequireJWT;
use crate::models::ErrorResponse;
use crate::models::enrollments::requests::CreateEnrollmentRequest;

pub async fn create_enrollment(
    service: &EnrollmentService,
    request: &HttpRequest,
    enrollment_data: CreateEnrollmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ErrorResponse::new("Unauthorized: missing user id")));
        }
    };

    match storage.create_enrollment(enrollment_data).await {
        Ok(enrollment) => {
            info!(
                "Enrollment of student {} in course {} created successfully by {}",
                enrollment.student_id, enrollment.course_id, uid
            );
            Ok(HttpResponse::Created().json(enrollment))
        }
        Err(SMSystemError::UniqueViolation(_)) => Ok(HttpResponse::BadRequest().json(
            ErrorResponse::new("Student is already enrolled in this course"),
        )),
        Err(e) => {
            error!("Enrollment creation failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse::internal()))
        }
    }
}
