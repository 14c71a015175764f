use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::PaginationQuery;
use crate::models::results::requests::{
    AddResultByDetailsRequest, AdvancedResultQuery, BatchResultRequest, CheckResultQuery,
    CreateResultRequest, ResultSearchQuery, UpdateResultRequest,
};
use crate::services::ResultService;
use crate::utils::{SafeClassIdI64, SafeExamIdI64, SafeIDI64, SafeStudentIdI64};

// 懒加载的全局 ResultService 实例
static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

pub async fn list_results(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.list_results(&req, query.into_inner()).await
}

pub async fn create_result(
    req: HttpRequest,
    result_data: web::Json<CreateResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .create_result(&req, result_data.into_inner())
        .await
}

pub async fn add_result_by_details(
    req: HttpRequest,
    details: web::Json<AddResultByDetailsRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .add_result_by_details(&req, details.into_inner())
        .await
}

pub async fn create_results_batch(
    req: HttpRequest,
    batch: web::Json<BatchResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .create_results_batch(&req, batch.into_inner())
        .await
}

pub async fn count_results(req: HttpRequest) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.count_results(&req).await
}

pub async fn search_results(
    req: HttpRequest,
    query: web::Query<ResultSearchQuery>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .search_results(&req, query.into_inner())
        .await
}

pub async fn advanced_search(
    req: HttpRequest,
    query: web::Query<AdvancedResultQuery>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .advanced_search(&req, query.into_inner())
        .await
}

pub async fn check_exists(
    req: HttpRequest,
    query: web::Query<CheckResultQuery>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.check_exists(&req, query.into_inner()).await
}

pub async fn list_by_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    let query = ResultSearchQuery {
        student_id: Some(student_id.0),
        ..Default::default()
    };
    RESULT_SERVICE.search_results(&req, query).await
}

pub async fn list_by_exam(req: HttpRequest, exam_id: SafeIDI64) -> ActixResult<HttpResponse> {
    let query = ResultSearchQuery {
        exam_id: Some(exam_id.0),
        ..Default::default()
    };
    RESULT_SERVICE.search_results(&req, query).await
}

pub async fn list_by_class(req: HttpRequest, class_id: SafeIDI64) -> ActixResult<HttpResponse> {
    let query = ResultSearchQuery {
        class_id: Some(class_id.0),
        ..Default::default()
    };
    RESULT_SERVICE.search_results(&req, query).await
}

pub async fn list_by_subject(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    let query = ResultSearchQuery {
        subject_id: Some(subject_id.0),
        ..Default::default()
    };
    RESULT_SERVICE.search_results(&req, query).await
}

pub async fn student_exam_summary(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    exam_id: SafeExamIdI64,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .student_exam_summary(&req, student_id.0, exam_id.0)
        .await
}

pub async fn class_exam_summary(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    exam_id: SafeExamIdI64,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .class_exam_summary(&req, class_id.0, exam_id.0)
        .await
}

pub async fn get_result(req: HttpRequest, result_id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.get_result(&req, result_id.0).await
}

pub async fn update_result(
    req: HttpRequest,
    result_id: SafeIDI64,
    update_data: web::Json<UpdateResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .update_result(&req, result_id.0, update_data.into_inner())
        .await
}

pub async fn delete_result(req: HttpRequest, result_id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.delete_result(&req, result_id.0).await
}

pub async fn delete_by_exam(req: HttpRequest, exam_id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.delete_by_exam(&req, exam_id.0).await
}

// 配置路由
pub fn configure_results_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/results")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(list_results))
                    .route(web::post().to(create_result)),
            )
            .route("/add-by-details", web::post().to(add_result_by_details))
            .route("/batch", web::post().to(create_results_batch))
            .route("/count", web::get().to(count_results))
            .route("/search", web::get().to(search_results))
            .route("/search/advanced", web::get().to(advanced_search))
            .route("/check-exists", web::get().to(check_exists))
            .route("/student/{id}", web::get().to(list_by_student))
            .service(
                web::resource("/exam/{id}")
                    .route(web::get().to(list_by_exam))
                    // 删除某场考试的全部成绩
                    .route(web::delete().to(delete_by_exam)),
            )
            .route("/class/{id}", web::get().to(list_by_class))
            .route("/subject/{id}", web::get().to(list_by_subject))
            .route(
                "/summary/class/{class_id}/exam/{exam_id}",
                web::get().to(class_exam_summary),
            )
            .route(
                "/summary/{student_id}/{exam_id}",
                web::get().to(student_exam_summary),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_result))
                    .route(web::put().to(update_result))
                    .route(web::delete().to(delete_result)),
            ),
    );
}
