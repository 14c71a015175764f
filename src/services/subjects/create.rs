use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::ApiResponse;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::services::common::{bad_request, conflict, storage_failure};
use crate::storage::Storage;
use crate::utils::validate::{missing_fields_message, required_text};

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_data: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let subject_name = required_text(subject_data.subject_name.as_ref());

    let (Some(subject_name), Some(class_id)) = (subject_name.clone(), subject_data.class_id) else {
        let missing: Vec<&str> = [
            ("SubjectName", subject_name.is_none()),
            ("ClassID", subject_data.class_id.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();
        return Ok(bad_request(
            missing_fields_message(&missing).unwrap_or_default(),
        ));
    };

    let storage = service.get_storage(request);

    if let Err(resp) = check_class_exists(&storage, class_id).await {
        return Ok(resp);
    }

    match storage.find_subject(&subject_name, class_id).await {
        Ok(Some(_)) => {
            return Ok(conflict(format!(
                "Subject {subject_name} already exists for this class"
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(storage_failure(e, "Failed to check subject")),
    }

    match storage.create_subject(&subject_name, class_id).await {
        Ok(subject) => {
            info!(
                "Subject {} created for class {}",
                subject.subject_name, subject.class_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                subject,
                "Subject added successfully",
            )))
        }
        Err(e) => Ok(storage_failure(e, "Failed to add subject")),
    }
}

/// 科目所属班级必须存在
pub(crate) async fn check_class_exists(
    storage: &Arc<dyn Storage>,
    class_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_class_by_id(class_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(bad_request(format!(
            "Class with ClassID {class_id} does not exist"
        ))),
        Err(e) => Err(storage_failure(e, "Failed to verify class")),
    }
}
