use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::UploadService;

static UPLOAD_SERVICE: Lazy<UploadService> = Lazy::new(UploadService::new_lazy);

pub async fn serve_upload(req: HttpRequest, path: web::Path<String>) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE.serve_upload(&req, path.into_inner()).await
}

// 本地对象存储写入的公开文件
pub fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/uploads/{filename:.*}", web::get().to(serve_upload));
}
