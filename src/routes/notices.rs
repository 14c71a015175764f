use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::notices::requests::{
    CreateNoticeRequest, SetVisibilityRequest, UpdateNoticeRequest,
};
use crate::services::NoticeService;
use crate::utils::SafeIDI64;

static NOTICE_SERVICE: Lazy<NoticeService> = Lazy::new(NoticeService::new_lazy);

pub async fn create_notice(
    req: HttpRequest,
    notice_data: web::Json<CreateNoticeRequest>,
) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE
        .create_notice(&req, notice_data.into_inner())
        .await
}

pub async fn list_notices(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE.list_notices(&req).await
}

pub async fn update_notice(
    req: HttpRequest,
    notice_id: SafeIDI64,
    update_data: web::Json<UpdateNoticeRequest>,
) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE
        .update_notice(&req, notice_id.0, update_data.into_inner())
        .await
}

pub async fn set_visibility(
    req: HttpRequest,
    notice_id: SafeIDI64,
    visibility: web::Json<SetVisibilityRequest>,
) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE
        .set_visibility(&req, notice_id.0, visibility.into_inner())
        .await
}

pub async fn toggle_visibility(req: HttpRequest, notice_id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE.toggle_visibility(&req, notice_id.0).await
}

pub async fn delete_notice(req: HttpRequest, notice_id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE.delete_notice(&req, notice_id.0).await
}

// 配置路由
pub fn configure_notices_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/notices")
            .route("", web::get().to(list_notices))
            .route("/", web::get().to(list_notices))
            .route("/add", web::post().to(create_notice))
            .route("/edit/{id}", web::put().to(update_notice))
            .route("/show/{id}", web::put().to(set_visibility))
            .route("/toggle-visibility/{id}", web::put().to(toggle_visibility))
            .route("/delete/{id}", web::delete().to(delete_notice)),
    );
}
