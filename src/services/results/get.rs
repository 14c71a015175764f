use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::results::{
    requests::{
        AdvancedResultQuery, CheckResultQuery, ResultFilter, ResultSearchQuery, ResultSortField,
    },
    responses::{AdvancedResultResponse, ResultExistsResponse},
};
use crate::models::{ApiResponse, CountResponse, ErrorCode, PaginationQuery};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::{parse_optional_date, required_text};

const DEFAULT_ADVANCED_LIMIT: i64 = 50;
const MAX_ADVANCED_LIMIT: i64 = 100;

pub async fn list_results(
    service: &ResultService,
    request: &HttpRequest,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_results_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Results retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list results")),
    }
}

pub async fn count_results(
    service: &ResultService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.count_results().await {
        Ok(count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CountResponse { count },
            "Result count retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to count results")),
    }
}

/// 按学生、考试、班级或科目筛选；单一维度的列表接口也走这里
pub async fn search_results(
    service: &ResultService,
    request: &HttpRequest,
    query: ResultSearchQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.search_results(query).await {
        Ok(results) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            results,
            "Results retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to search results")),
    }
}

fn parse_marks(value: Option<&str>, field: &str) -> Result<Option<f64>, String> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<f64>()
            .ok()
            .filter(|m| m.is_finite())
            .map(Some)
            .ok_or_else(|| format!("{field} must be a number")),
    }
}

/// 把查询串整理为存储层筛选条件
fn build_filter(query: &AdvancedResultQuery) -> Result<ResultFilter, String> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_ADVANCED_LIMIT)
        .clamp(1, MAX_ADVANCED_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);

    let descending = !matches!(
        query.sort_order.as_deref().map(str::to_ascii_lowercase).as_deref(),
        Some("asc")
    );

    Ok(ResultFilter {
        student_name: required_text(query.student_name.as_ref()),
        roll_number: query.roll_number,
        class_name: required_text(query.class_name.as_ref()),
        section: required_text(query.section.as_ref()),
        exam_name: required_text(query.exam_name.as_ref()),
        exam_type: required_text(query.exam_type.as_ref()),
        subject_name: required_text(query.subject_name.as_ref()),
        min_marks: parse_marks(query.min_marks.as_deref(), "minMarks")?,
        max_marks: parse_marks(query.max_marks.as_deref(), "maxMarks")?,
        start_date: parse_optional_date(query.start_date.as_deref(), "startDate")?,
        end_date: parse_optional_date(query.end_date.as_deref(), "endDate")?,
        sort_by: ResultSortField::parse(query.sort_by.as_deref()),
        descending,
        limit: limit as u64,
        offset: offset as u64,
    })
}

pub async fn advanced_search(
    service: &ResultService,
    request: &HttpRequest,
    query: AdvancedResultQuery,
) -> ActixResult<HttpResponse> {
    let filter = match build_filter(&query) {
        Ok(filter) => filter,
        Err(msg) => return Ok(bad_request(msg)),
    };
    let (limit, offset) = (filter.limit as i64, filter.offset as i64);

    let storage = service.get_storage(request);

    match storage.advanced_search_results(filter).await {
        Ok((results, total)) => {
            let has_more = offset + (results.len() as i64) < total;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AdvancedResultResponse {
                    results,
                    total,
                    limit,
                    offset,
                    has_more,
                },
                "Results searched successfully",
            )))
        }
        Err(e) => Ok(storage_failure(e, "Failed to search results")),
    }
}

pub async fn check_exists(
    service: &ResultService,
    request: &HttpRequest,
    query: CheckResultQuery,
) -> ActixResult<HttpResponse> {
    let (Some(student_id), Some(exam_id), Some(subject_id)) =
        (query.student_id, query.exam_id, query.subject_id)
    else {
        return Ok(bad_request(
            "Student ID, exam ID, and subject ID are required",
        ));
    };

    let storage = service.get_storage(request);

    match storage.find_result(student_id, exam_id, subject_id).await {
        Ok(found) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ResultExistsResponse {
                exists: found.is_some(),
                result_id: found.map(|r| r.result_id),
            },
            "Result existence checked successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to check result")),
    }
}

pub async fn get_result(
    service: &ResultService,
    request: &HttpRequest,
    result_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_result_by_id(result_id).await {
        Ok(Some(result)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Result retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ResultNotFound, "Result not found")),
        Err(e) => Ok(storage_failure(e, "Failed to get result")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advanced_filter_defaults_and_caps() {
        let filter = build_filter(&AdvancedResultQuery::default()).unwrap();
        assert_eq!(filter.limit, 50);
        assert_eq!(filter.offset, 0);
        assert!(filter.descending);
        assert_eq!(filter.sort_by, ResultSortField::ExamDate);

        let query = AdvancedResultQuery {
            limit: Some(1000),
            offset: Some(-5),
            sort_order: Some("ASC".to_string()),
            ..Default::default()
        };
        let filter = build_filter(&query).unwrap();
        assert_eq!(filter.limit, 100);
        assert_eq!(filter.offset, 0);
        assert!(!filter.descending);
    }

    #[test]
    fn test_advanced_filter_rejects_bad_marks() {
        let query = AdvancedResultQuery {
            min_marks: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(build_filter(&query).is_err());

        let query = AdvancedResultQuery {
            max_marks: Some(" 75.5 ".to_string()),
            ..Default::default()
        };
        assert_eq!(build_filter(&query).unwrap().max_marks, Some(75.5));
    }
}
