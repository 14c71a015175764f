use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::subjects::requests::{CreateSubjectRequest, UpdateSubjectRequest};
use crate::services::SubjectService;
use crate::utils::{SafeClassIdI64, SafeIDI64};

static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

pub async fn list_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(&req, None).await
}

pub async fn list_by_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(&req, Some(class_id.0)).await
}

pub async fn create_subject(
    req: HttpRequest,
    subject_data: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .create_subject(&req, subject_data.into_inner())
        .await
}

pub async fn class_options(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.class_options(&req).await
}

pub async fn update_subject(
    req: HttpRequest,
    subject_id: SafeIDI64,
    update_data: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .update_subject(&req, subject_id.0, update_data.into_inner())
        .await
}

pub async fn delete_subject(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(&req, subject_id.0).await
}

// 配置路由
pub fn configure_subjects_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/subjects")
            .route("", web::get().to(list_subjects))
            .route("/", web::get().to(list_subjects))
            .route("/add", web::post().to(create_subject))
            .route("/classes", web::get().to(class_options))
            .route("/class/{class_id}", web::get().to(list_by_class))
            .route("/edit/{id}", web::put().to(update_subject))
            .route("/delete/{id}", web::delete().to(delete_subject)),
    );
}
