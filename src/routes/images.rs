use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::images::requests::{ImageDetailsQuery, UpdateImageRequest};
use crate::services::ImageService;
use crate::storage::ImageQuery;
use crate::utils::SafeIDI64;

// 懒加载的全局 ImageService 实例
static IMAGE_SERVICE: Lazy<ImageService> = Lazy::new(ImageService::new_lazy);

pub async fn upload_image(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    IMAGE_SERVICE.upload_image(&req, payload).await
}

pub async fn list_image_details(
    req: HttpRequest,
    query: web::Query<ImageDetailsQuery>,
) -> ActixResult<HttpResponse> {
    IMAGE_SERVICE
        .list_image_details(&req, query.into_inner())
        .await
}

pub async fn list_by_type(
    req: HttpRequest,
    image_type: web::Path<String>,
) -> ActixResult<HttpResponse> {
    IMAGE_SERVICE
        .list_by_type(&req, image_type.into_inner())
        .await
}

pub async fn list_by_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    let query = ImageQuery {
        student_id: Some(student_id.0),
        ..Default::default()
    };
    IMAGE_SERVICE.list_images(&req, query).await
}

pub async fn list_by_teacher(req: HttpRequest, teacher_id: SafeIDI64) -> ActixResult<HttpResponse> {
    let query = ImageQuery {
        teacher_id: Some(teacher_id.0),
        ..Default::default()
    };
    IMAGE_SERVICE.list_images(&req, query).await
}

pub async fn get_image(req: HttpRequest, image_id: SafeIDI64) -> ActixResult<HttpResponse> {
    IMAGE_SERVICE.get_image(&req, image_id.0).await
}

pub async fn update_image(
    req: HttpRequest,
    image_id: SafeIDI64,
    update_data: web::Json<UpdateImageRequest>,
) -> ActixResult<HttpResponse> {
    IMAGE_SERVICE
        .update_image(&req, image_id.0, update_data.into_inner())
        .await
}

pub async fn replace_image(
    req: HttpRequest,
    image_id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    IMAGE_SERVICE.replace_image(&req, image_id.0, payload).await
}

pub async fn delete_image(req: HttpRequest, image_id: SafeIDI64) -> ActixResult<HttpResponse> {
    IMAGE_SERVICE.delete_image(&req, image_id.0).await
}

// 配置路由
pub fn configure_images_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/images")
            .service(
                web::resource(["", "/"])
                    // 上传需要登录，查询公开
                    .route(web::post().to(upload_image).wrap(middlewares::RequireJWT)),
            )
            .route("/details", web::get().to(list_image_details))
            .route("/type/{image_type}", web::get().to(list_by_type))
            .route("/student/{id}", web::get().to(list_by_student))
            .route("/teacher/{id}", web::get().to(list_by_teacher))
            .route(
                "/{id}/image",
                web::put().to(replace_image).wrap(middlewares::RequireJWT),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_image))
                    .route(web::put().to(update_image).wrap(middlewares::RequireJWT))
                    .route(web::delete().to(delete_image).wrap(middlewares::RequireJWT)),
            ),
    );
}
