pub mod admins;
pub mod attendance;
pub mod classes;
pub mod common;
pub mod events;
pub mod exams;
pub mod health;
pub mod images;
pub mod messages;
pub mod notices;
pub mod results;
pub mod routines;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod uploads;

pub use admins::AdminService;
pub use attendance::AttendanceService;
pub use classes::ClassService;
pub use events::EventService;
pub use exams::ExamService;
pub use health::HealthService;
pub use images::ImageService;
pub use messages::MessageService;
pub use notices::NoticeService;
pub use results::ResultService;
pub use routines::RoutineService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use teachers::TeacherService;
pub use uploads::UploadService;
