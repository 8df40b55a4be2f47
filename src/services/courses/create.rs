use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::errors::SMSystemError;
use crate::middlewares::RequireJWT;
use crate::models::ErrorResponse;
use crate::models::courses::requests::CreateCourseRequest;

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ErrorResponse::new("Unauthorized: missing user id")));
        }
    };

    match storage.create_course(course_data).await {
        Ok(course) => {
            info!("Course {} created successfully by {}", course.code, uid);
            Ok(HttpResponse::Created().json(course))
        }
        Err(SMSystemError::UniqueViolation(_)) => Ok(HttpResponse::BadRequest()
            .json(ErrorResponse::new("Course with this code already exists"))),
        Err(e) => {
            error!("Course creation failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse::internal()))
        }
    }
}
