use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ResultService;
use crate::models::results::responses::DeletedCountResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{not_found, storage_failure};

pub async fn delete_result(
    service: &ResultService,
    request: &HttpRequest,
    result_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_result(result_id).await {
        Ok(true) => {
            info!("Result {} deleted", result_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Result deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::ResultNotFound, "Result not found")),
        Err(e) => Ok(storage_failure(e, "Failed to delete result")),
    }
}

// 删除某场考试的全部成绩
pub async fn delete_by_exam(
    service: &ResultService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_results_by_exam(exam_id).await {
        Ok(deleted) => {
            info!("{} results deleted for exam {}", deleted, exam_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                DeletedCountResponse { deleted },
                format!("{deleted} results deleted successfully"),
            )))
        }
        Err(e) => Ok(storage_failure(e, "Failed to delete results")),
    }
}
