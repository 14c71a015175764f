use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::routines::requests::{RoutineFilterQuery, RoutineSearchQuery};
use crate::services::RoutineService;
use crate::storage::RoutineQuery;
use crate::utils::{SafeClassIdI64, SafeIDI64};

// 懒加载的全局 RoutineService 实例
static ROUTINE_SERVICE: Lazy<RoutineService> = Lazy::new(RoutineService::new_lazy);

pub async fn list_routines(req: HttpRequest) -> ActixResult<HttpResponse> {
    ROUTINE_SERVICE
        .list_routines(&req, RoutineQuery::default())
        .await
}

pub async fn create_routine(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    ROUTINE_SERVICE.create_routine(&req, payload).await
}

pub async fn filter_by_class_section(
    req: HttpRequest,
    query: web::Query<RoutineFilterQuery>,
) -> ActixResult<HttpResponse> {
    ROUTINE_SERVICE
        .filter_by_class_section(&req, query.into_inner())
        .await
}

pub async fn list_by_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    let query = RoutineQuery {
        class_id: Some(class_id.0),
        ..Default::default()
    };
    ROUTINE_SERVICE.list_routines(&req, query).await
}

pub async fn search_routines(
    req: HttpRequest,
    query: web::Query<RoutineSearchQuery>,
) -> ActixResult<HttpResponse> {
    ROUTINE_SERVICE
        .search_routines(&req, query.into_inner())
        .await
}

pub async fn class_options(req: HttpRequest) -> ActixResult<HttpResponse> {
    ROUTINE_SERVICE.class_options(&req).await
}

pub async fn filter_options(req: HttpRequest) -> ActixResult<HttpResponse> {
    ROUTINE_SERVICE.filter_options(&req).await
}

pub async fn sections_for_class(
    req: HttpRequest,
    class_name: web::Path<String>,
) -> ActixResult<HttpResponse> {
    ROUTINE_SERVICE
        .sections_for_class(&req, class_name.into_inner())
        .await
}

pub async fn get_routine(req: HttpRequest, routine_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ROUTINE_SERVICE.get_routine(&req, routine_id.0).await
}

pub async fn update_routine(
    req: HttpRequest,
    routine_id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    ROUTINE_SERVICE
        .update_routine(&req, routine_id.0, payload)
        .await
}

pub async fn delete_routine(req: HttpRequest, routine_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ROUTINE_SERVICE.delete_routine(&req, routine_id.0).await
}

// 配置路由
pub fn configure_routines_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/routines")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(list_routines))
                    .route(web::post().to(create_routine).wrap(middlewares::RequireJWT)),
            )
            .route(
                "/filter/class-section",
                web::get().to(filter_by_class_section),
            )
            .route("/class/{class_id}", web::get().to(list_by_class))
            .route("/search/query", web::get().to(search_routines))
            .route("/options/classes", web::get().to(class_options))
            .route("/options/filters", web::get().to(filter_options))
            .route(
                "/options/sections/{class_name}",
                web::get().to(sections_for_class),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_routine))
                    .route(web::put().to(update_routine).wrap(middlewares::RequireJWT))
                    .route(web::delete().to(delete_routine).wrap(middlewares::RequireJWT)),
            ),
    );
}
