use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::StudentService;
use crate::errors::SMSystemError;
use crate::middlewares::RequireJWT;
use crate::models::ErrorResponse;
use crate::models::students::requests::CreateStudentRequest;

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ErrorResponse::new("Unauthorized: missing user id")));
        }
    };

    match storage.create_student(student_data).await {
        Ok(student) => {
            info!("Student {} created successfully by {}", student.email, uid);
            Ok(HttpResponse::Created().json(student))
        }
        Err(SMSystemError::UniqueViolation(_)) => Ok(HttpResponse::BadRequest()
            .json(ErrorResponse::new("Student with this email already exists"))),
        Err(e) => {
            error!("Student creation failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse::internal()))
        }
    }
}
