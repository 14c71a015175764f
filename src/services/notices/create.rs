use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NoticeService;
use crate::models::ApiResponse;
use crate::models::notices::requests::CreateNoticeRequest;
use crate::services::common::{bad_request, storage_failure};
use crate::utils::validate::required_text;

pub async fn create_notice(
    service: &NoticeService,
    request: &HttpRequest,
    notice_data: CreateNoticeRequest,
) -> ActixResult<HttpResponse> {
    let (Some(title), Some(description)) = (
        required_text(notice_data.title.as_ref()),
        required_text(notice_data.description.as_ref()),
    ) else {
        return Ok(bad_request("Title and description are required"));
    };

    let storage = service.get_storage(request);

    // 未指定时默认展示
    let show = notice_data.show.unwrap_or(true);

    match storage.create_notice(&title, &description, show).await {
        Ok(notice) => {
            info!("Notice {} created", notice.notice_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                notice,
                "Notice added successfully",
            )))
        }
        Err(e) => Ok(storage_failure(e, "Failed to add notice")),
    }
}
