use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::teachers::requests::{
    CheckDuplicateQuery, CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest,
};
use crate::services::TeacherService;
use crate::utils::SafeIDI64;

static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

pub async fn create_teacher(
    req: HttpRequest,
    teacher_data: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .create_teacher(&req, teacher_data.into_inner())
        .await
}

pub async fn list_teachers(
    req: HttpRequest,
    query: web::Query<TeacherListQuery>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .list_teachers(&req, query.into_inner())
        .await
}

pub async fn count_teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.count_teachers(&req).await
}

pub async fn check_duplicate(
    req: HttpRequest,
    query: web::Query<CheckDuplicateQuery>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .check_duplicate(&req, query.into_inner())
        .await
}

pub async fn get_teacher(req: HttpRequest, teacher_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_teacher(&req, teacher_id.0).await
}

pub async fn update_teacher(
    req: HttpRequest,
    teacher_id: SafeIDI64,
    update_data: web::Json<UpdateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_teacher(&req, teacher_id.0, update_data.into_inner())
        .await
}

pub async fn delete_teacher(req: HttpRequest, teacher_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.delete_teacher(&req, teacher_id.0).await
}

// 配置路由
pub fn configure_teachers_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/teachers")
            .route("", web::get().to(list_teachers))
            .route("/", web::get().to(list_teachers))
            .route("/addTeacher", web::post().to(create_teacher))
            .route("/count", web::get().to(count_teachers))
            .route("/checkDuplicate", web::get().to(check_duplicate))
            .route("/updateTeacher/{id}", web::put().to(update_teacher))
            .route("/deleteTeacher/{id}", web::delete().to(delete_teacher))
            .route("/{id}", web::get().to(get_teacher)),
    );
}
