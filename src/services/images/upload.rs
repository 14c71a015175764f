use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::ImageService;
use crate::config::AppConfig;
use crate::models::images::{
    entities::ImageType,
    requests::{ImageFormFields, ImagePatch, NewImage},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::services::uploads::{UploadForm, UploadRules, read_upload_form};

/// multipart 中的图片字段名
const IMAGE_FIELD: &str = "image";

/// 已校验的图片元数据
struct ImageMeta {
    image_type: ImageType,
    description: Option<String>,
    student_id: Option<i64>,
    teacher_id: Option<i64>,
}

fn parse_optional_id(value: Option<String>, field: &str) -> Result<Option<i64>, String> {
    value
        .map(|v| {
            v.parse::<i64>()
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| format!("{field} must be a positive integer"))
        })
        .transpose()
}

fn parse_meta(fields: ImageFormFields) -> Result<ImageMeta, String> {
    let Some(image_type) = fields.image_type else {
        return Err("Missing required fields: ImageType".to_string());
    };

    Ok(ImageMeta {
        image_type: image_type.parse()?,
        description: fields.description,
        student_id: parse_optional_id(fields.student_id, "StudentID")?,
        teacher_id: parse_optional_id(fields.teacher_id, "TeacherID")?,
    })
}

fn form_fields(form: &UploadForm) -> ImageFormFields {
    ImageFormFields {
        image_type: form.text("ImageType"),
        description: form.text("Description"),
        student_id: form.text("StudentID"),
        teacher_id: form.text("TeacherID"),
    }
}

fn missing_file() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::FileNotFound,
        "No image file uploaded",
    ))
}

fn store_failed(context: &str, err: impl std::fmt::Display) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::FileUploadFailed,
        format!("{context}: {err}"),
    ))
}

pub async fn upload_image(
    service: &ImageService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();

    let rules = UploadRules::images(&config.upload);
    let form = match read_upload_form(payload, IMAGE_FIELD, rules).await {
        Ok(form) => form,
        Err(resp) => return Ok(resp),
    };

    let meta = match parse_meta(form_fields(&form)) {
        Ok(meta) => meta,
        Err(msg) => return Ok(bad_request(msg)),
    };
    let Some(file) = form.file.as_ref() else {
        return Ok(missing_file());
    };

    let object_store = service.get_object_store(request);
    let stored = match object_store
        .upload(file.path(), &meta.image_type.folder(), &file.content_type)
        .await
    {
        Ok(stored) => stored,
        Err(e) => return Ok(store_failed("Failed to upload image", e)),
    };

    let storage = service.get_storage(request);

    let new_image = NewImage {
        image_path: stored.url,
        public_id: stored.public_id.clone(),
        description: meta.description,
        image_type: meta.image_type.to_string(),
        student_id: meta.student_id,
        teacher_id: meta.teacher_id,
    };

    match storage.create_image(new_image).await {
        Ok(image) => {
            info!(
                "Image {} uploaded to {} via {}",
                image.image_id,
                meta.image_type.folder(),
                object_store.name()
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                image,
                "Image uploaded successfully",
            )))
        }
        Err(e) => {
            // 记录写入失败时撤回已上传的对象
            if let Err(cleanup) = object_store.delete(&stored.public_id).await {
                warn!("Failed to remove orphaned object {}: {}", stored.public_id, cleanup);
            }
            Ok(storage_failure(e, "Failed to save image"))
        }
    }
}

pub async fn replace_image(
    service: &ImageService,
    request: &HttpRequest,
    image_id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();

    let rules = UploadRules::images(&config.upload);
    let form = match read_upload_form(payload, IMAGE_FIELD, rules).await {
        Ok(form) => form,
        Err(resp) => return Ok(resp),
    };
    let Some(file) = form.file.as_ref() else {
        return Ok(missing_file());
    };

    let storage = service.get_storage(request);

    let existing = match storage.get_image_by_id(image_id).await {
        Ok(Some(image)) => image,
        Ok(None) => return Ok(not_found(ErrorCode::ImageNotFound, "Image not found")),
        Err(e) => return Ok(storage_failure(e, "Failed to load image")),
    };

    let object_store = service.get_object_store(request);
    let stored = match object_store
        .upload(file.path(), &existing.image_type.folder(), &file.content_type)
        .await
    {
        Ok(stored) => stored,
        Err(e) => return Ok(store_failed("Failed to upload image", e)),
    };

    let patch = ImagePatch {
        image_path: Some(stored.url),
        public_id: Some(stored.public_id),
        ..Default::default()
    };

    let image = match storage.update_image(image_id, patch).await {
        Ok(Some(image)) => image,
        Ok(None) => return Ok(not_found(ErrorCode::ImageNotFound, "Image not found")),
        Err(e) => return Ok(storage_failure(e, "Failed to update image")),
    };

    // 旧对象删除失败不影响本次替换
    if let Err(e) = object_store.delete(&existing.public_id).await {
        warn!(
            "Failed to delete previous object {} for image {}: {}",
            existing.public_id, image_id, e
        );
    }

    info!("Image {} replaced", image_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        image,
        "Image replaced successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meta() {
        let meta = parse_meta(ImageFormFields {
            image_type: Some("student".to_string()),
            description: None,
            student_id: Some("12".to_string()),
            teacher_id: None,
        })
        .unwrap();
        assert_eq!(meta.image_type, ImageType::Student);
        assert_eq!(meta.student_id, Some(12));

        assert!(parse_meta(ImageFormFields::default()).is_err());
        assert!(
            parse_meta(ImageFormFields {
                image_type: Some("school".to_string()),
                teacher_id: Some("abc".to_string()),
                ..Default::default()
            })
            .is_err()
        );
    }
}
