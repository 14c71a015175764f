use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use super::create::{check_roll_available, resolve_class};
use crate::models::students::{
    entities::Gender,
    requests::{StudentPatch, UpdateStudentRequest},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::{parse_optional_date, required_text};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    update_data: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let date_of_birth =
        match parse_optional_date(update_data.date_of_birth.as_deref(), "DateOfBirth") {
            Ok(date) => date,
            Err(msg) => return Ok(bad_request(msg)),
        };
    let admission_date =
        match parse_optional_date(update_data.admission_date.as_deref(), "AdmissionDate") {
            Ok(date) => date,
            Err(msg) => return Ok(bad_request(msg)),
        };
    let gender = match required_text(update_data.gender.as_ref())
        .map(|g| g.parse::<Gender>())
        .transpose()
    {
        Ok(gender) => gender,
        Err(msg) => return Ok(bad_request(msg)),
    };
    if let Some(roll) = update_data.roll_number
        && roll <= 0
    {
        return Ok(bad_request("RollNumber must be a positive integer"));
    }

    let storage = service.get_storage(request);

    let current = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(storage_failure(e, "Failed to get student")),
    };

    // 只给出班级或分部之一时，另一项沿用当前值
    let class_name = required_text(update_data.class.as_ref());
    let section = required_text(update_data.section.as_ref());
    let class_id = if class_name.is_some() || section.is_some() {
        let class_name = class_name.unwrap_or_else(|| current.class_name.clone());
        let section = section.unwrap_or_else(|| current.section.clone());
        match resolve_class(&storage, class_name, section).await {
            Ok(id) => Some(id),
            Err(resp) => return Ok(resp),
        }
    } else {
        None
    };

    if class_id.is_some() || update_data.roll_number.is_some() {
        let target_class = class_id.unwrap_or(current.class_id);
        let target_roll = update_data.roll_number.unwrap_or(current.roll_number);
        if let Err(resp) =
            check_roll_available(&storage, target_class, target_roll, Some(student_id)).await
        {
            return Ok(resp);
        }
    }

    let patch = StudentPatch {
        first_name: required_text(update_data.first_name.as_ref()),
        last_name: required_text(update_data.last_name.as_ref()),
        date_of_birth,
        gender: gender.map(|g| g.to_string()),
        class_id,
        roll_number: update_data.roll_number,
        admission_date,
        address: update_data.address.map(|a| a.trim().to_string()),
        parent_contact: update_data.parent_contact.map(|p| p.trim().to_string()),
    };

    match storage.update_student(student_id, patch).await {
        Ok(Some(student)) => {
            info!("Student {} updated", student.student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Student updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(storage_failure(e, "Failed to update student")),
    }
}
