use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::results::{requests::ResultSearchQuery, responses::StudentExamSummary};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{not_found, storage_failure};

pub async fn student_exam_summary(
    service: &ResultService,
    request: &HttpRequest,
    student_id: i64,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let totals = match storage.exam_totals(student_id, exam_id).await {
        Ok(Some(totals)) => totals,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::ResultNotFound,
                "No results found for this student and exam",
            ));
        }
        Err(e) => return Ok(storage_failure(e, "Failed to summarize results")),
    };

    let subjects = match storage
        .search_results(ResultSearchQuery {
            student_id: Some(student_id),
            exam_id: Some(exam_id),
            ..Default::default()
        })
        .await
    {
        Ok(rows) => rows,
        Err(e) => return Ok(storage_failure(e, "Failed to summarize results")),
    };

    let summary = StudentExamSummary {
        student_id,
        exam_id,
        subjects,
        total_marks: totals.total_marks,
        max_marks: totals.max_marks,
        percentage: totals.percentage,
        subject_count: totals.subject_count,
        overall_grade: totals.overall_grade,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        summary,
        "Student result summary retrieved successfully",
    )))
}

pub async fn class_exam_summary(
    service: &ResultService,
    request: &HttpRequest,
    class_id: i64,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.class_exam_summary(class_id, exam_id).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            rows,
            "Class results summary retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to summarize class results")),
    }
}
