use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::events::requests::{
    CreateEventRequest, EventDateRangeQuery, UpdateEventRequest,
};
use crate::services::EventService;
use crate::utils::SafeIDI64;

// 懒加载的全局 EventService 实例
static EVENT_SERVICE: Lazy<EventService> = Lazy::new(EventService::new_lazy);

pub async fn list_events(req: HttpRequest) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.list_events(&req).await
}

pub async fn create_event(
    req: HttpRequest,
    event_data: web::Json<CreateEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .create_event(&req, event_data.into_inner())
        .await
}

pub async fn list_in_range(
    req: HttpRequest,
    query: web::Query<EventDateRangeQuery>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.list_in_range(&req, query.into_inner()).await
}

pub async fn list_by_type(
    req: HttpRequest,
    event_type: web::Path<String>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .list_by_type(&req, event_type.into_inner())
        .await
}

pub async fn get_event(req: HttpRequest, event_id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.get_event(&req, event_id.0).await
}

pub async fn update_event(
    req: HttpRequest,
    event_id: SafeIDI64,
    update_data: web::Json<UpdateEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .update_event(&req, event_id.0, update_data.into_inner())
        .await
}

pub async fn delete_event(req: HttpRequest, event_id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.delete_event(&req, event_id.0).await
}

// 配置路由
pub fn configure_events_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/events")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(list_events))
                    .route(web::post().to(create_event)),
            )
            .route("/date-range", web::get().to(list_in_range))
            .route("/type/{event_type}", web::get().to(list_by_type))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_event))
                    .route(web::put().to(update_event))
                    .route(web::delete().to(delete_event)),
            ),
    );
}
