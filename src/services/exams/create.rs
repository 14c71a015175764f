use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use tracing::info;

use super::ExamService;
use crate::models::exams::{
    entities::ExamType,
    requests::{CreateExamByClassRequest, CreateExamRequest, NewExam},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::services::subjects::create::check_class_exists;
use crate::utils::validate::{missing_fields_message, parse_date, required_text};

// 名称、类型与日期的公共校验
struct ExamBasics {
    exam_name: String,
    exam_type: ExamType,
    exam_date: NaiveDate,
}

fn validate_basics(
    exam_name: Option<&String>,
    exam_type: Option<&String>,
    exam_date: Option<&String>,
    class_fields: &[(&'static str, bool)],
) -> Result<ExamBasics, HttpResponse> {
    let exam_name = required_text(exam_name);
    let exam_type = required_text(exam_type);
    let exam_date = required_text(exam_date);

    let mut missing: Vec<&str> = [
        ("ExamName", exam_name.is_none()),
        ("ExamType", exam_type.is_none()),
        ("ExamDate", exam_date.is_none()),
    ]
    .into_iter()
    .filter_map(|(field, absent)| absent.then_some(field))
    .collect();
    missing.extend(
        class_fields
            .iter()
            .filter_map(|(field, absent)| absent.then_some(*field)),
    );
    if let Some(msg) = missing_fields_message(&missing) {
        return Err(bad_request(msg));
    }

    let (Some(exam_name), Some(exam_type), Some(exam_date)) = (exam_name, exam_type, exam_date)
    else {
        return Err(bad_request("Missing required fields"));
    };

    let exam_type = exam_type.parse::<ExamType>().map_err(bad_request)?;
    let exam_date = parse_date(&exam_date, "ExamDate").map_err(bad_request)?;

    // 不允许安排在过去的日期
    if exam_date < chrono::Local::now().date_naive() {
        return Err(bad_request("ExamDate cannot be in the past"));
    }

    Ok(ExamBasics {
        exam_name,
        exam_type,
        exam_date,
    })
}

pub async fn create_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_data: CreateExamRequest,
) -> ActixResult<HttpResponse> {
    let basics = match validate_basics(
        exam_data.exam_name.as_ref(),
        exam_data.exam_type.as_ref(),
        exam_data.exam_date.as_ref(),
        &[("ClassID", exam_data.class_id.is_none())],
    ) {
        Ok(basics) => basics,
        Err(resp) => return Ok(resp),
    };
    let Some(class_id) = exam_data.class_id else {
        return Ok(bad_request("Missing required fields: ClassID"));
    };

    let storage = service.get_storage(request);

    if let Err(resp) = check_class_exists(&storage, class_id).await {
        return Ok(resp);
    }

    insert_exam(service, request, basics, class_id).await
}

pub async fn create_exam_by_class(
    service: &ExamService,
    request: &HttpRequest,
    exam_data: CreateExamByClassRequest,
) -> ActixResult<HttpResponse> {
    let class_name = required_text(exam_data.class_name.as_ref());
    let section = required_text(exam_data.section.as_ref());

    let basics = match validate_basics(
        exam_data.exam_name.as_ref(),
        exam_data.exam_type.as_ref(),
        exam_data.exam_date.as_ref(),
        &[
            ("ClassName", class_name.is_none()),
            ("Section", section.is_none()),
        ],
    ) {
        Ok(basics) => basics,
        Err(resp) => return Ok(resp),
    };
    let (Some(class_name), Some(section)) = (class_name, section) else {
        return Ok(bad_request("Missing required fields: ClassName, Section"));
    };

    let storage = service.get_storage(request);

    let class_id = match storage.find_class(&class_name, &section).await {
        Ok(Some(class)) => class.class_id,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::ClassNotFound,
                format!("Class {class_name} section {section} not found"),
            ));
        }
        Err(e) => return Ok(storage_failure(e, "Failed to find class")),
    };

    insert_exam(service, request, basics, class_id).await
}

async fn insert_exam(
    service: &ExamService,
    request: &HttpRequest,
    basics: ExamBasics,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let new_exam = NewExam {
        exam_name: basics.exam_name,
        exam_type: basics.exam_type.to_string(),
        class_id,
        exam_date: basics.exam_date,
    };

    match storage.create_exam(new_exam).await {
        Ok(exam) => {
            info!("Exam {} created for class {}", exam.exam_name, exam.class_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(exam, "Exam created successfully")))
        }
        Err(e) => Ok(storage_failure(e, "Failed to create exam")),
    }
}
