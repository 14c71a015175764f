use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::exams::requests::{
    CreateExamByClassRequest, CreateExamRequest, ExamSearchQuery, UpcomingExamQuery,
    UpdateExamRequest,
};
use crate::services::ExamService;
use crate::utils::{SafeClassIdI64, SafeIDI64};

// 懒加载的全局 ExamService 实例
static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

pub async fn list_exams(req: HttpRequest) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(&req).await
}

pub async fn create_exam(
    req: HttpRequest,
    exam_data: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.create_exam(&req, exam_data.into_inner()).await
}

pub async fn create_exam_by_class(
    req: HttpRequest,
    exam_data: web::Json<CreateExamByClassRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .create_exam_by_class(&req, exam_data.into_inner())
        .await
}

pub async fn search_exams(
    req: HttpRequest,
    query: web::Query<ExamSearchQuery>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.search_exams(&req, query.into_inner()).await
}

pub async fn upcoming_exams(
    req: HttpRequest,
    query: web::Query<UpcomingExamQuery>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.upcoming_exams(&req, query.into_inner()).await
}

pub async fn list_by_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_by_class(&req, class_id.0).await
}

pub async fn get_exam(req: HttpRequest, exam_id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_exam(&req, exam_id.0).await
}

pub async fn update_exam(
    req: HttpRequest,
    exam_id: SafeIDI64,
    update_data: web::Json<UpdateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .update_exam(&req, exam_id.0, update_data.into_inner())
        .await
}

pub async fn delete_exam(req: HttpRequest, exam_id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(&req, exam_id.0).await
}

// 配置路由
pub fn configure_exams_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/exams")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(list_exams))
                    .route(web::post().to(create_exam)),
            )
            .route("/by-class", web::post().to(create_exam_by_class))
            .route("/search", web::get().to(search_exams))
            .route("/upcoming", web::get().to(upcoming_exams))
            .route("/class/{class_id}", web::get().to(list_by_class))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_exam))
                    .route(web::put().to(update_exam))
                    .route(web::delete().to(delete_exam)),
            ),
    );
}
