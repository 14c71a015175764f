use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::exams::requests::{ExamFilter, ExamSearchQuery, UpcomingExamQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::{parse_optional_date, required_text};

/// 未指定天数时查询未来 30 天
const DEFAULT_UPCOMING_DAYS: i64 = 30;

pub async fn list_exams(service: &ExamService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    find_exams(service, request, ExamFilter::default()).await
}

pub async fn search_exams(
    service: &ExamService,
    request: &HttpRequest,
    query: ExamSearchQuery,
) -> ActixResult<HttpResponse> {
    let start_date = match parse_optional_date(query.start_date.as_deref(), "StartDate") {
        Ok(date) => date,
        Err(msg) => return Ok(bad_request(msg)),
    };
    let end_date = match parse_optional_date(query.end_date.as_deref(), "EndDate") {
        Ok(date) => date,
        Err(msg) => return Ok(bad_request(msg)),
    };

    let filter = ExamFilter {
        exam_name: required_text(query.exam_name.as_ref()),
        class_id: query.class_id,
        start_date,
        end_date,
    };

    find_exams(service, request, filter).await
}

pub async fn upcoming_exams(
    service: &ExamService,
    request: &HttpRequest,
    query: UpcomingExamQuery,
) -> ActixResult<HttpResponse> {
    let days = query.days.unwrap_or(DEFAULT_UPCOMING_DAYS);
    if !(1..=366).contains(&days) {
        return Ok(bad_request("days must be between 1 and 366"));
    }

    let today = chrono::Local::now().date_naive();
    let filter = ExamFilter {
        start_date: Some(today),
        end_date: Some(today + chrono::Duration::days(days)),
        ..Default::default()
    };

    find_exams(service, request, filter).await
}

pub async fn list_by_class(
    service: &ExamService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let filter = ExamFilter {
        class_id: Some(class_id),
        ..Default::default()
    };

    find_exams(service, request, filter).await
}

pub async fn get_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_exam_by_id(exam_id).await {
        Ok(Some(exam)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            exam,
            "Exam retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ExamNotFound, "Exam not found")),
        Err(e) => Ok(storage_failure(e, "Failed to get exam")),
    }
}

async fn find_exams(
    service: &ExamService,
    request: &HttpRequest,
    filter: ExamFilter,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_exams(filter).await {
        Ok(exams) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            exams,
            "Exams retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list exams")),
    }
}
