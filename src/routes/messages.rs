use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::messages::requests::{CreateMessageRequest, UpdateMessageRequest};
use crate::services::MessageService;
use crate::utils::SafeIDI64;

static MESSAGE_SERVICE: Lazy<MessageService> = Lazy::new(MessageService::new_lazy);

pub async fn create_message(
    req: HttpRequest,
    message_data: web::Json<CreateMessageRequest>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE
        .create_message(&req, message_data.into_inner())
        .await
}

pub async fn list_messages(req: HttpRequest) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.list_messages(&req).await
}

pub async fn update_message(
    req: HttpRequest,
    message_id: SafeIDI64,
    update_data: web::Json<UpdateMessageRequest>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE
        .update_message(&req, message_id.0, update_data.into_inner())
        .await
}

pub async fn toggle_visibility(req: HttpRequest, message_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.toggle_visibility(&req, message_id.0).await
}

pub async fn delete_message(req: HttpRequest, message_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.delete_message(&req, message_id.0).await
}

// 配置路由
pub fn configure_messages_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/messages")
            .route("", web::get().to(list_messages))
            .route("/", web::get().to(list_messages))
            .route("/add", web::post().to(create_message))
            .route("/edit/{id}", web::put().to(update_message))
            .route("/toggle-visibility/{id}", web::put().to(toggle_visibility))
            .route("/delete/{id}", web::delete().to(delete_message)),
    );
}
