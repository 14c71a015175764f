use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::students::requests::{
    CheckRollQuery, CreateStudentRequest, StudentListQuery, StudentSearchQuery,
    UpdateStudentRequest,
};
use crate::services::StudentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_students(&req, query.into_inner())
        .await
}

pub async fn create_student(
    req: HttpRequest,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(&req, student_data.into_inner())
        .await
}

pub async fn count_students(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.count_students(&req).await
}

pub async fn search_students(
    req: HttpRequest,
    query: web::Query<StudentSearchQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .search_students(&req, query.into_inner())
        .await
}

pub async fn check_roll(
    req: HttpRequest,
    query: web::Query<CheckRollQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.check_roll(&req, query.into_inner()).await
}

pub async fn list_by_class(
    req: HttpRequest,
    class_name: web::Path<String>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_by_class(&req, class_name.into_inner(), None)
        .await
}

pub async fn list_by_class_section(
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (class_name, section) = path.into_inner();
    STUDENT_SERVICE
        .list_by_class(&req, class_name, Some(section))
        .await
}

pub async fn get_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(&req, student_id.0).await
}

pub async fn update_student(
    req: HttpRequest,
    student_id: SafeIDI64,
    update_data: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(&req, student_id.0, update_data.into_inner())
        .await
}

pub async fn delete_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(&req, student_id.0).await
}

// 配置路由
pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/students")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(list_students))
                    .route(web::post().to(create_student)),
            )
            .route("/count", web::get().to(count_students))
            .route("/search", web::get().to(search_students))
            .route("/check-roll", web::get().to(check_roll))
            .route("/class/{class_name}", web::get().to(list_by_class))
            .route(
                "/class/{class_name}/section/{section}",
                web::get().to(list_by_class_section),
            )
            .route("/updateStudent/{id}", web::put().to(update_student))
            .route("/deleteStudent/{id}", web::delete().to(delete_student))
            .route("/{id}", web::get().to(get_student)),
    );
}
