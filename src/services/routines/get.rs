use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RoutineService;
use crate::models::classes::responses::ClassOption;
use crate::models::routines::{
    requests::{RoutineFilterQuery, RoutineSearchQuery},
    responses::RoutineFilterOptions,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::storage::RoutineQuery;

/// 搜索关键字的最短长度
const MIN_SEARCH_CHARS: usize = 2;

/// `all` 或空值表示不过滤
fn filter_value(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
        .map(str::to_string)
}

pub async fn list_routines(
    service: &RoutineService,
    request: &HttpRequest,
    query: RoutineQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_routines(query).await {
        Ok(routines) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            routines,
            "Routines retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list routines")),
    }
}

pub async fn filter_by_class_section(
    service: &RoutineService,
    request: &HttpRequest,
    query: RoutineFilterQuery,
) -> ActixResult<HttpResponse> {
    let query = RoutineQuery {
        class_name: filter_value(query.class_name.as_ref()),
        section: filter_value(query.section.as_ref()),
        ..Default::default()
    };

    list_routines(service, request, query).await
}

pub async fn search_routines(
    service: &RoutineService,
    request: &HttpRequest,
    query: RoutineSearchQuery,
) -> ActixResult<HttpResponse> {
    let keyword = query.q.as_deref().map(str::trim).unwrap_or_default();
    if keyword.chars().count() < MIN_SEARCH_CHARS {
        return Ok(bad_request("Search term must be at least 2 characters"));
    }

    let query = RoutineQuery {
        keyword: Some(keyword.to_string()),
        ..Default::default()
    };

    list_routines(service, request, query).await
}

pub async fn get_routine(
    service: &RoutineService,
    request: &HttpRequest,
    routine_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_routine_by_id(routine_id).await {
        Ok(Some(routine)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            routine,
            "Routine retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::RoutineNotFound, "Routine not found")),
        Err(e) => Ok(storage_failure(e, "Failed to get routine")),
    }
}

pub async fn class_options(
    service: &RoutineService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_classes().await {
        Ok(classes) => {
            let options: Vec<ClassOption> = classes.iter().map(ClassOption::from).collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                options,
                "Classes retrieved successfully",
            )))
        }
        Err(e) => Ok(storage_failure(e, "Failed to list classes")),
    }
}

pub async fn filter_options(
    service: &RoutineService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let class_names = match storage.list_class_names().await {
        Ok(names) => names,
        Err(e) => return Ok(storage_failure(e, "Failed to list class names")),
    };
    let sections = match storage.list_sections(None).await {
        Ok(sections) => sections,
        Err(e) => return Ok(storage_failure(e, "Failed to list sections")),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RoutineFilterOptions {
            class_names,
            sections,
        },
        "Filter options retrieved successfully",
    )))
}

pub async fn sections_for_class(
    service: &RoutineService,
    request: &HttpRequest,
    class_name: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_sections(Some(class_name.trim())).await {
        Ok(sections) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            sections,
            "Sections retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list sections")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_value_treats_all_as_absent() {
        assert_eq!(filter_value(Some(&"all".to_string())), None);
        assert_eq!(filter_value(Some(&"ALL".to_string())), None);
        assert_eq!(filter_value(Some(&" ".to_string())), None);
        assert_eq!(filter_value(Some(&"10".to_string())), Some("10".to_string()));
        assert_eq!(filter_value(None), None);
    }
}
