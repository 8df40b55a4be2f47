pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod students;

pub use auth::AuthService;
pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use students::StudentService;
