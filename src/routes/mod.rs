pub mod admins;

pub mod classes;

pub mod teachers;

pub mod students;

pub mod subjects;

pub mod exams;

pub mod results;

pub mod attendance;

pub mod notices;

pub mod messages;

pub mod events;

pub mod images;

pub mod routines;

pub mod uploads;

pub mod health;

pub use admins::configure_admin_routes;
pub use attendance::configure_attendance_routes;
pub use classes::configure_classes_routes;
pub use events::configure_events_routes;
pub use exams::configure_exams_routes;
pub use health::configure_health_routes;
pub use images::configure_images_routes;
pub use messages::configure_messages_routes;
pub use notices::configure_notices_routes;
pub use results::configure_results_routes;
pub use routines::configure_routines_routes;
pub use students::configure_students_routes;
pub use subjects::configure_subjects_routes;
pub use teachers::configure_teachers_routes;
pub use uploads::configure_upload_routes;

/// 注册全部 API 路由，测试与 main 共用
pub fn configure_all(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_admin_routes)
        .configure(configure_classes_routes)
        .configure(configure_teachers_routes)
        .configure(configure_students_routes)
        .configure(configure_subjects_routes)
        .configure(configure_exams_routes)
        .configure(configure_results_routes)
        .configure(configure_attendance_routes)
        .configure(configure_notices_routes)
        .configure(configure_messages_routes)
        .configure(configure_events_routes)
        .configure(configure_images_routes)
        .configure(configure_routines_routes)
        .configure(configure_upload_routes);
}
