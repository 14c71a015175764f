use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::ApiResponse;
use crate::models::teachers::requests::{CreateTeacherRequest, NewTeacher};
use crate::services::common::{bad_request, conflict, storage_failure};
use crate::storage::Storage;
use crate::utils::validate::{
    missing_fields_message, parse_optional_date, required_text, validate_email,
};

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_data: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let first_name = required_text(teacher_data.first_name.as_ref());
    let last_name = required_text(teacher_data.last_name.as_ref());
    let subject = required_text(teacher_data.subject.as_ref());
    let contact_number = required_text(teacher_data.contact_number.as_ref());
    let email = required_text(teacher_data.email.as_ref());

    let (Some(first_name), Some(last_name), Some(subject), Some(contact_number), Some(email)) = (
        first_name.clone(),
        last_name.clone(),
        subject.clone(),
        contact_number.clone(),
        email.clone(),
    ) else {
        let missing: Vec<&str> = [
            ("FirstName", first_name.is_none()),
            ("LastName", last_name.is_none()),
            ("Subject", subject.is_none()),
            ("ContactNumber", contact_number.is_none()),
            ("Email", email.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();
        return Ok(bad_request(
            missing_fields_message(&missing).unwrap_or_default(),
        ));
    };

    if let Err(msg) = validate_email(&email) {
        return Ok(bad_request(msg));
    }

    // 入职日期缺省为今天
    let joining_date = match parse_optional_date(teacher_data.joining_date.as_deref(), "JoiningDate")
    {
        Ok(date) => date.unwrap_or_else(|| chrono::Local::now().date_naive()),
        Err(msg) => return Ok(bad_request(msg)),
    };

    let storage = service.get_storage(request);

    if let Err(resp) = check_duplicate(&storage, Some(&email), Some(&contact_number), None).await {
        return Ok(resp);
    }

    let new_teacher = NewTeacher {
        first_name,
        last_name,
        subject,
        contact_number,
        email,
        joining_date,
        address: required_text(teacher_data.address.as_ref()),
    };

    match storage.create_teacher(new_teacher).await {
        Ok(teacher) => {
            info!("Teacher {} created", teacher.full_name());
            Ok(HttpResponse::Created().json(ApiResponse::success(
                teacher,
                "Teacher added successfully",
            )))
        }
        Err(e) => Ok(storage_failure(e, "Failed to add teacher")),
    }
}

/// 邮箱或联系电话已被其他教师使用时返回 409
pub(crate) async fn check_duplicate(
    storage: &Arc<dyn Storage>,
    email: Option<&str>,
    contact_number: Option<&str>,
    exclude_id: Option<i64>,
) -> Result<(), HttpResponse> {
    match storage
        .find_teacher_duplicate(email, contact_number, exclude_id)
        .await
    {
        Ok(Some(field)) => Err(conflict(format!(
            "A teacher with this {field} already exists"
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(storage_failure(e, "Failed to check duplicate teacher")),
    }
}
