use std::collections::HashSet;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::ResultService;
use crate::errors::SchoolError;
use crate::models::results::{
    entities::is_valid_marks,
    requests::{AddResultByDetailsRequest, BatchResultRequest, CreateResultRequest, NewResult},
    responses::BatchResultResponse,
};
use crate::models::{ApiResponse, ErrorCode, RowError};
use crate::services::common::{bad_request, conflict, storage_failure};
use crate::storage::Storage;
use crate::utils::validate::{missing_fields_message, required_text};

/// 单条成绩校验失败的原因
pub(crate) enum Rejection {
    Invalid(String),
    Duplicate,
    Storage(SchoolError),
}

impl From<SchoolError> for Rejection {
    fn from(err: SchoolError) -> Self {
        Self::Storage(err)
    }
}

impl Rejection {
    fn into_response(self) -> HttpResponse {
        match self {
            Self::Invalid(msg) => bad_request(msg),
            Self::Duplicate => {
                conflict("Result already exists for this student, exam, and subject")
            }
            Self::Storage(e) => storage_failure(e, "Failed to validate result"),
        }
    }
}

/// 成绩录入的完整校验：必填、分数区间、学生与考试归属班级、科目存在、不重复
pub(crate) async fn validate_result(
    storage: &Arc<dyn Storage>,
    data: &CreateResultRequest,
) -> Result<NewResult, Rejection> {
    let (Some(student_id), Some(exam_id), Some(subject_id), Some(class_id), Some(marks)) = (
        data.student_id,
        data.exam_id,
        data.subject_id,
        data.class_id,
        data.marks_obtained,
    ) else {
        let missing: Vec<&str> = [
            ("StudentID", data.student_id.is_none()),
            ("ExamID", data.exam_id.is_none()),
            ("SubjectID", data.subject_id.is_none()),
            ("ClassID", data.class_id.is_none()),
            ("MarksObtained", data.marks_obtained.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();
        return Err(Rejection::Invalid(
            missing_fields_message(&missing).unwrap_or_default(),
        ));
    };

    if !is_valid_marks(marks) {
        return Err(Rejection::Invalid(
            "MarksObtained must be between 0 and 100".to_string(),
        ));
    }

    match storage.get_student_by_id(student_id).await? {
        None => return Err(Rejection::Invalid(format!("Student {student_id} not found"))),
        Some(student) if student.class_id != class_id => {
            return Err(Rejection::Invalid(format!(
                "Student {student_id} does not belong to class {class_id}"
            )));
        }
        Some(_) => {}
    }

    match storage.get_exam_by_id(exam_id).await? {
        None => return Err(Rejection::Invalid(format!("Exam {exam_id} not found"))),
        Some(exam) if exam.class_id != class_id => {
            return Err(Rejection::Invalid(format!(
                "Exam {exam_id} is not scheduled for class {class_id}"
            )));
        }
        Some(_) => {}
    }

    if storage.get_subject_by_id(subject_id).await?.is_none() {
        return Err(Rejection::Invalid(format!("Subject {subject_id} not found")));
    }

    if storage
        .find_result(student_id, exam_id, subject_id)
        .await?
        .is_some()
    {
        return Err(Rejection::Duplicate);
    }

    Ok(NewResult {
        student_id,
        exam_id,
        subject_id,
        class_id,
        marks_obtained: marks,
    })
}

pub async fn create_result(
    service: &ResultService,
    request: &HttpRequest,
    result_data: CreateResultRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let new_result = match validate_result(&storage, &result_data).await {
        Ok(new_result) => new_result,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    insert_result(&storage, new_result).await
}

pub async fn add_result_by_details(
    service: &ResultService,
    request: &HttpRequest,
    details: AddResultByDetailsRequest,
) -> ActixResult<HttpResponse> {
    let student_name = required_text(details.student_name.as_ref());
    if student_name.is_none() && details.roll_number.is_none() {
        return Ok(bad_request("Either student name or roll number is required"));
    }

    let class_name = required_text(details.class_name.as_ref());
    let section = required_text(details.section_name.as_ref());
    let exam_name = required_text(details.exam_name.as_ref());
    let subject_name = required_text(details.subject_name.as_ref());

    let (Some(class_name), Some(section), Some(exam_name), Some(subject_name), Some(marks)) = (
        class_name,
        section,
        exam_name,
        subject_name,
        details.marks_obtained,
    ) else {
        return Ok(bad_request(
            "className, sectionName, examName, subjectName, and marksObtained are required",
        ));
    };

    let storage = service.get_storage(request);

    let class = match storage.find_class(&class_name, &section).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(bad_request(format!(
                "Class {class_name} section {section} not found"
            )));
        }
        Err(e) => return Ok(storage_failure(e, "Failed to find class")),
    };

    let student = match storage
        .find_student_in_class(class.class_id, student_name.as_deref(), details.roll_number)
        .await
    {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(bad_request("Student not found in the given class")),
        Err(e) => return Ok(storage_failure(e, "Failed to find student")),
    };

    let exam = match storage.find_exam(&exam_name, class.class_id).await {
        Ok(Some(exam)) => exam,
        Ok(None) => {
            return Ok(bad_request(format!(
                "Exam {exam_name} not found for this class"
            )));
        }
        Err(e) => return Ok(storage_failure(e, "Failed to find exam")),
    };

    let subject = match storage.find_subject(&subject_name, class.class_id).await {
        Ok(Some(subject)) => subject,
        Ok(None) => {
            return Ok(bad_request(format!(
                "Subject {subject_name} not found for this class"
            )));
        }
        Err(e) => return Ok(storage_failure(e, "Failed to find subject")),
    };

    let result_data = CreateResultRequest {
        student_id: Some(student.student_id),
        exam_id: Some(exam.exam_id),
        subject_id: Some(subject.subject_id),
        class_id: Some(class.class_id),
        marks_obtained: Some(marks),
    };

    let new_result = match validate_result(&storage, &result_data).await {
        Ok(new_result) => new_result,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    insert_result(&storage, new_result).await
}

pub async fn create_results_batch(
    service: &ResultService,
    request: &HttpRequest,
    batch: BatchResultRequest,
) -> ActixResult<HttpResponse> {
    if batch.results.is_empty() {
        return Ok(bad_request(
            "Results array is required and cannot be empty",
        ));
    }

    let storage = service.get_storage(request);

    let mut errors = Vec::new();
    let mut inserted = 0usize;
    let mut seen = HashSet::new();

    for (index, row) in batch.results.iter().enumerate() {
        let new_result = match validate_result(&storage, row).await {
            Ok(new_result) => new_result,
            Err(Rejection::Invalid(message)) => {
                errors.push(RowError { index, message });
                continue;
            }
            Err(Rejection::Duplicate) => {
                errors.push(RowError {
                    index,
                    message: "Result already exists for this student, exam, and subject"
                        .to_string(),
                });
                continue;
            }
            Err(Rejection::Storage(e)) => {
                return Ok(storage_failure(e, "Failed to validate results"));
            }
        };

        // 同一批次内的重复行
        if !seen.insert((
            new_result.student_id,
            new_result.exam_id,
            new_result.subject_id,
        )) {
            errors.push(RowError {
                index,
                message: "Duplicate result within the batch".to_string(),
            });
            continue;
        }

        match storage.create_result(new_result).await {
            Ok(_) => inserted += 1,
            Err(SchoolError::Conflict(msg)) => errors.push(RowError { index, message: msg }),
            Err(e) => return Ok(storage_failure(e, "Failed to add results")),
        }
    }

    let body = BatchResultResponse { inserted, errors };

    if inserted == 0 {
        warn!("Batch result insert rejected every row");
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ValidationFailed,
            body,
            "No results were added",
        )));
    }

    info!("{} results added in batch", inserted);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        body,
        format!("{inserted} results added successfully"),
    )))
}

async fn insert_result(
    storage: &Arc<dyn Storage>,
    new_result: NewResult,
) -> ActixResult<HttpResponse> {
    match storage.create_result(new_result).await {
        Ok(result) => {
            info!(
                "Result {} added for student {}",
                result.result_id, result.student_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                result,
                "Result added successfully",
            )))
        }
        Err(e) => Ok(storage_failure(e, "Failed to add result")),
    }
}
