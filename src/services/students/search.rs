use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::ApiResponse;
use crate::models::students::{
    requests::{CheckRollQuery, StudentSearchQuery},
    responses::RollCheckResponse,
};
use crate::services::common::{bad_request, storage_failure};
use crate::utils::validate::{missing_fields_message, required_text};

pub async fn search_students(
    service: &StudentService,
    request: &HttpRequest,
    query: StudentSearchQuery,
) -> ActixResult<HttpResponse> {
    if query.is_empty() {
        return Ok(bad_request(
            "At least one search parameter is required: FirstName, Class, Section or RollNumber",
        ));
    }

    let storage = service.get_storage(request);

    match storage.search_students(query).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            students,
            "Students retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to search students")),
    }
}

pub async fn check_roll(
    service: &StudentService,
    request: &HttpRequest,
    query: CheckRollQuery,
) -> ActixResult<HttpResponse> {
    let class_name = required_text(query.class_name.as_ref());
    let section = required_text(query.section.as_ref());

    let (Some(roll_number), Some(class_name), Some(section)) =
        (query.roll_number, class_name.clone(), section.clone())
    else {
        let missing: Vec<&str> = [
            ("rollNumber", query.roll_number.is_none()),
            ("className", class_name.is_none()),
            ("section", section.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();
        return Ok(bad_request(
            missing_fields_message(&missing).unwrap_or_default(),
        ));
    };

    let Ok(roll_number) = i32::try_from(roll_number) else {
        return Ok(bad_request("rollNumber is out of range"));
    };

    let storage = service.get_storage(request);

    // 班级尚不存在时学号必然可用
    let class = match storage.find_class(&class_name, &section).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::Ok().json(ApiResponse::success(
                RollCheckResponse {
                    exists: false,
                    student_id: None,
                },
                "Roll number is available",
            )));
        }
        Err(e) => return Ok(storage_failure(e, "Failed to check roll number")),
    };

    match storage
        .find_student_by_roll(class.class_id, roll_number, query.exclude_student_id)
        .await
    {
        Ok(student) => {
            let response = RollCheckResponse {
                exists: student.is_some(),
                student_id: student.map(|s| s.student_id),
            };
            let message = if response.exists {
                "Roll number already exists"
            } else {
                "Roll number is available"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, message)))
        }
        Err(e) => Ok(storage_failure(e, "Failed to check roll number")),
    }
}

pub async fn list_by_class(
    service: &StudentService,
    request: &HttpRequest,
    class_name: String,
    section: Option<String>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_students_by_class(class_name.trim(), section.as_deref().map(str::trim))
        .await
    {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            students,
            "Students retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list students by class")),
    }
}
