use crate::models::courses::requests::CreateCourseRequest;
use crate::models::enrollments::entities::EnrollmentStatus;
use crate::models::enrollments::requests::CreateEnrollmentRequest;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何用户，则创建一个默认的 admin 账号
async fn seed_admin(storage: &Arc<dyn Storage>) {
    // 检查是否已有用户
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    // 哈希密码
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    // 创建管理员账号
    let admin_request = CreateUserRequest {
        email: "admin@example.com".to_string(),
        name: "Admin User".to_string(),
        password: password_hash,
        role: UserRole::Admin,
    };

    match storage.create_user(admin_request).await {
        Ok(user) => {
            info!(
                "Default admin account created successfully (ID: {}, email: {})",
                user.id, user.email
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 初始化示例数据
/// 学生、课程、选课记录各自在对应表为空时写入一次
async fn seed_sample_data(storage: &Arc<dyn Storage>) {
    seed_sample_students(storage).await;
    seed_sample_courses(storage).await;
    seed_sample_enrollments(storage).await;
}

async fn seed_sample_students(storage: &Arc<dyn Storage>) {
    match storage.count_students().await {
        Ok(0) => {}
        Ok(_) => return,
        Err(e) => {
            warn!("Failed to count students: {}, skipping student seed", e);
            return;
        }
    }

    let samples = [
        ("john.doe@student.com", "John", "Doe", "+1234567890", "New York", "Computer Science", 2023),
        ("jane.smith@student.com", "Jane", "Smith", "+1234567891", "Boston", "Mathematics", 2023),
        ("mike.johnson@student.com", "Mike", "Johnson", "+1234567892", "Chicago", "Physics", 2022),
    ];

    for (email, first_name, last_name, phone, city, major, year) in samples {
        let request = CreateStudentRequest {
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone: Some(phone.to_string()),
            address: None,
            city: Some(city.to_string()),
            zip_code: None,
            date_of_birth: None,
            enrollment_year: Some(year),
            major: Some(major.to_string()),
        };
        if let Err(e) = storage.create_student(request).await {
            warn!("Failed to seed student {}: {}", email, e);
            return;
        }
    }
    info!("Sample students created");
}

async fn seed_sample_courses(storage: &Arc<dyn Storage>) {
    match storage.count_courses().await {
        Ok(0) => {}
        Ok(_) => return,
        Err(e) => {
            warn!("Failed to count courses: {}, skipping course seed", e);
            return;
        }
    }

    let samples = [
        ("CS101", "Introduction to Programming", "Learn the basics of programming with Python", 3, 1),
        ("CS201", "Data Structures", "Study of fundamental data structures", 4, 2),
        ("MATH101", "Calculus I", "Differential calculus and applications", 4, 1),
        ("MATH201", "Linear Algebra", "Vectors, matrices, and linear transformations", 3, 2),
    ];

    for (code, title, description, credits, semester) in samples {
        let request = CreateCourseRequest {
            code: code.to_string(),
            title: title.to_string(),
            description: Some(description.to_string()),
            credits,
            semester,
        };
        if let Err(e) = storage.create_course(request).await {
            warn!("Failed to seed course {}: {}", code, e);
            return;
        }
    }
    info!("Sample courses created");
}

async fn seed_sample_enrollments(storage: &Arc<dyn Storage>) {
    match storage.count_enrollments().await {
        Ok(0) => {}
        Ok(_) => return,
        Err(e) => {
            warn!("Failed to count enrollments: {}, skipping enrollment seed", e);
            return;
        }
    }

    // 选课记录依赖已有的学生和课程
    let (students, courses) = match (storage.list_students().await, storage.list_courses().await) {
        (Ok(students), Ok(courses)) if !students.is_empty() && !courses.is_empty() => {
            (students, courses)
        }
        (Ok(_), Ok(_)) => return,
        (Err(e), _) | (_, Err(e)) => {
            warn!("Failed to load seed data: {}, skipping enrollment seed", e);
            return;
        }
    };

    let samples = [
        (0usize, 0usize, Some("A"), EnrollmentStatus::Active),
        (0, 1, Some("B+"), EnrollmentStatus::Active),
        (1, 0, None, EnrollmentStatus::Active),
        (2, 2, Some("A-"), EnrollmentStatus::Completed),
    ];

    for (student_idx, course_idx, grade, status) in samples {
        let (Some(student), Some(course)) = (students.get(student_idx), courses.get(course_idx))
        else {
            continue;
        };
        let request = CreateEnrollmentRequest {
            student_id: student.id,
            course_id: course.id,
            grade: grade.map(|g| g.to_string()),
            status: Some(status),
        };
        if let Err(e) = storage.create_enrollment(request).await {
            warn!(
                "Failed to seed enrollment ({}, {}): {}",
                student.id, course.id, e
            );
            return;
        }
    }
    info!("Sample enrollments created");
}

/// 准备服务器启动的上下文
/// 包括存储创建、迁移和种子数据
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    seed_admin(&storage).await;

    // 初始化示例数据（如果需要）
    seed_sample_data(&storage).await;

    StartupContext { storage }
}
