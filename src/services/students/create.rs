use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::ApiResponse;
use crate::models::classes::requests::NewClass;
use crate::models::students::{
    entities::Gender,
    requests::{CreateStudentRequest, NewStudent},
};
use crate::services::common::{bad_request, conflict, storage_failure};
use crate::storage::Storage;
use crate::utils::validate::{
    missing_fields_message, parse_date, parse_optional_date, required_text,
};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let first_name = required_text(student_data.first_name.as_ref());
    let last_name = required_text(student_data.last_name.as_ref());
    let date_of_birth = required_text(student_data.date_of_birth.as_ref());
    let gender = required_text(student_data.gender.as_ref());
    let class_name = required_text(student_data.class.as_ref());
    let section = required_text(student_data.section.as_ref());

    let missing: Vec<&str> = [
        ("FirstName", first_name.is_none()),
        ("LastName", last_name.is_none()),
        ("DateOfBirth", date_of_birth.is_none()),
        ("Gender", gender.is_none()),
        ("Class", class_name.is_none()),
        ("Section", section.is_none()),
        ("RollNumber", student_data.roll_number.is_none()),
    ]
    .into_iter()
    .filter_map(|(field, absent)| absent.then_some(field))
    .collect();

    let (
        Some(first_name),
        Some(last_name),
        Some(date_of_birth),
        Some(gender),
        Some(class_name),
        Some(section),
        Some(roll_number),
    ) = (
        first_name,
        last_name,
        date_of_birth,
        gender,
        class_name,
        section,
        student_data.roll_number,
    )
    else {
        return Ok(bad_request(
            missing_fields_message(&missing).unwrap_or_default(),
        ));
    };

    let date_of_birth = match parse_date(&date_of_birth, "DateOfBirth") {
        Ok(date) => date,
        Err(msg) => return Ok(bad_request(msg)),
    };
    let admission_date =
        match parse_optional_date(student_data.admission_date.as_deref(), "AdmissionDate") {
            Ok(date) => date.unwrap_or_else(|| chrono::Local::now().date_naive()),
            Err(msg) => return Ok(bad_request(msg)),
        };
    let gender = match gender.parse::<Gender>() {
        Ok(gender) => gender,
        Err(msg) => return Ok(bad_request(msg)),
    };
    if roll_number <= 0 {
        return Ok(bad_request("RollNumber must be a positive integer"));
    }

    let storage = service.get_storage(request);

    // 班级名称 + 分部解析为班级 ID，不存在时创建
    let class_id = match resolve_class(&storage, class_name, section).await {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = check_roll_available(&storage, class_id, roll_number, None).await {
        return Ok(resp);
    }

    let new_student = NewStudent {
        first_name,
        last_name,
        date_of_birth,
        gender: gender.to_string(),
        class_id,
        roll_number,
        admission_date,
        address: required_text(student_data.address.as_ref()),
        parent_contact: required_text(student_data.parent_contact.as_ref()),
    };

    match storage.create_student(new_student).await {
        Ok(student) => {
            info!(
                "Student {} created in class {}",
                student.student_id, student.class_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "Student added successfully",
            )))
        }
        Err(e) => Ok(storage_failure(e, "Failed to add student")),
    }
}

/// 按名称与分部获取或创建班级，返回班级 ID
pub(crate) async fn resolve_class(
    storage: &Arc<dyn Storage>,
    class_name: String,
    section: String,
) -> Result<i64, HttpResponse> {
    let new_class = NewClass {
        class_name,
        section,
        teacher_id: None,
    };

    match storage.get_or_create_class(new_class).await {
        Ok((class, created)) => {
            if created {
                info!("Class {} created while saving student", class.display_name());
            }
            Ok(class.class_id)
        }
        Err(e) => Err(storage_failure(e, "Failed to resolve class")),
    }
}

/// 同一班级内学号不能重复
pub(crate) async fn check_roll_available(
    storage: &Arc<dyn Storage>,
    class_id: i64,
    roll_number: i32,
    exclude_id: Option<i64>,
) -> Result<(), HttpResponse> {
    match storage
        .find_student_by_roll(class_id, roll_number, exclude_id)
        .await
    {
        Ok(Some(_)) => Err(conflict(format!(
            "Roll number {roll_number} already exists in this class"
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(storage_failure(e, "Failed to check roll number")),
    }
}
