pub mod auth;

pub mod courses;

pub mod enrollments;

pub mod students;

pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use enrollments::configure_enrollments_routes;
pub use students::configure_students_routes;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::tests::test_storage;
    use crate::utils::jwt::JwtUtils;
    use crate::utils::password::hash_password;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};
    use std::sync::Arc;

    // 完整的路由配置 + 内存存储，与 main.rs 的组装保持一致
    macro_rules! init_app {
        ($storage:expr) => {
            test::init_service(
                App::new()
                    .app_data(
                        web::JsonConfig::default().error_handler(crate::utils::json_error_handler),
                    )
                    .app_data(web::Data::new($storage.clone()))
                    .configure(configure_auth_routes)
                    .configure(configure_students_routes)
                    .configure(configure_courses_routes)
                    .configure(configure_enrollments_routes),
            )
            .await
        };
    }

    /// 内存存储 + 一个可登录的管理员，返回 (存储, access token)
    async fn seeded_storage() -> (Arc<dyn Storage>, String) {
        let storage: Arc<dyn Storage> = Arc::new(test_storage().await);
        let admin = storage
            .create_user(CreateUserRequest {
                email: "admin@example.com".to_string(),
                name: "Admin User".to_string(),
                password: hash_password("password123").expect("hash password"),
                role: UserRole::Admin,
            })
            .await
            .expect("seed admin");
        let token = JwtUtils::generate_access_token(admin.id, &admin.role.to_string())
            .expect("generate token");
        (storage, token)
    }

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {token}"))
    }

    #[actix_web::test]
    async fn test_unauthenticated_requests_are_rejected() {
        let (storage, _token) = seeded_storage().await;
        let app = init_app!(storage);

        for uri in ["/api/students", "/api/courses", "/api/enrollments"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "GET {uri}");

            let req = test::TestRequest::post()
                .uri(uri)
                .set_json(json!({}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "POST {uri}");
        }

        // 被拒绝的请求不应产生任何写入
        assert_eq!(storage.count_students().await.unwrap(), 0);
        assert_eq!(storage.count_courses().await.unwrap(), 0);
        assert_eq!(storage.count_enrollments().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_garbage_token_is_rejected() {
        let (storage, _token) = seeded_storage().await;
        let app = init_app!(storage);

        let req = test::TestRequest::get()
            .uri("/api/students")
            .insert_header(bearer("definitely-not-a-jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_create_then_list_students_newest_first() {
        let (storage, token) = seeded_storage().await;
        let app = init_app!(storage);

        for email in ["john.doe@student.com", "jane.smith@student.com"] {
            let req = test::TestRequest::post()
                .uri("/api/students")
                .insert_header(bearer(&token))
                .set_json(json!({
                    "email": email,
                    "firstName": "Test",
                    "lastName": "Student",
                    "major": "Computer Science",
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get()
            .uri("/api/students")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let students = body.as_array().expect("bare array response");
        assert_eq!(students.len(), 2);
        // 最新创建的排在最前面
        assert_eq!(students[0]["email"], "jane.smith@student.com");
        assert_eq!(students[1]["email"], "john.doe@student.com");
        // 未提供的可选字段为 null，学籍状态默认 active
        assert_eq!(students[0]["phone"], Value::Null);
        assert_eq!(students[0]["status"], "active");
    }

    #[actix_web::test]
    async fn test_duplicate_student_email_returns_400() {
        let (storage, token) = seeded_storage().await;
        let app = init_app!(storage);

        let make_request = || {
            test::TestRequest::post()
                .uri("/api/students")
                .insert_header(bearer(&token))
                .set_json(json!({
                    "email": "dup@student.com",
                    "firstName": "Dup",
                    "lastName": "Licate",
                }))
                .to_request()
        };

        let resp = test::call_service(&app, make_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = test::call_service(&app, make_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Student with this email already exists");
    }

    #[actix_web::test]
    async fn test_create_course_returns_created_row() {
        let (storage, token) = seeded_storage().await;
        let app = init_app!(storage);

        let make_request = || {
            test::TestRequest::post()
                .uri("/api/courses")
                .insert_header(bearer(&token))
                .set_json(json!({
                    "code": "CS101",
                    "title": "Intro",
                    "credits": 3,
                    "semester": 1,
                }))
                .to_request()
        };

        let resp = test::call_service(&app, make_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "CS101");
        assert!(body["id"].as_i64().expect("generated id") > 0);

        // 课程代码唯一
        let resp = test::call_service(&app, make_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Course with this code already exists");
    }

    #[actix_web::test]
    async fn test_duplicate_enrollment_pair_returns_400() {
        let (storage, token) = seeded_storage().await;
        let app = init_app!(storage);

        let student_req = test::TestRequest::post()
            .uri("/api/students")
            .insert_header(bearer(&token))
            .set_json(json!({
                "email": "enrollee@student.com",
                "firstName": "En",
                "lastName": "Rollee",
            }))
            .to_request();
        let student: Value = test::read_body_json(test::call_service(&app, student_req).await).await;

        let course_req = test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&token))
            .set_json(json!({
                "code": "MATH101",
                "title": "Calculus I",
                "credits": 4,
                "semester": 1,
            }))
            .to_request();
        let course: Value = test::read_body_json(test::call_service(&app, course_req).await).await;

        let make_request = || {
            test::TestRequest::post()
                .uri("/api/enrollments")
                .insert_header(bearer(&token))
                .set_json(json!({
                    "studentId": student["id"],
                    "courseId": course["id"],
                }))
                .to_request()
        };

        let resp = test::call_service(&app, make_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        // status 缺省为 active
        assert_eq!(body["status"], "active");
        assert_eq!(body["grade"], Value::Null);

        let resp = test::call_service(&app, make_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Student is already enrolled in this course");
    }

    #[actix_web::test]
    async fn test_login_and_me_flow() {
        let (storage, _token) = seeded_storage().await;
        let app = init_app!(storage);

        // 错误密码
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({
                "email": "admin@example.com",
                "password": "wrong-password",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // 正确密码
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({
                "email": "admin@example.com",
                "password": "password123",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let access_token = body["accessToken"].as_str().expect("access token");
        // 密码哈希绝不能出现在响应里
        assert!(body["user"].get("passwordHash").is_none());

        // 登录颁发的令牌可以通过会话守卫
        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer(access_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["user"]["email"], "admin@example.com");
    }
}
