use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::RoutineService;
use crate::models::routines::responses::{DeletedRoutine, RoutineDeletedResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{not_found, storage_failure};

pub async fn delete_routine(
    service: &RoutineService,
    request: &HttpRequest,
    routine_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let routine = match storage.get_routine_by_id(routine_id).await {
        Ok(Some(routine)) => routine,
        Ok(None) => return Ok(not_found(ErrorCode::RoutineNotFound, "Routine not found")),
        Err(e) => return Ok(storage_failure(e, "Failed to load routine")),
    };

    if let Some(public_id) = routine.file_public_id.as_deref() {
        let object_store = service.get_object_store(request);
        if let Err(e) = object_store.delete(public_id).await {
            warn!(
                "Failed to delete routine file {} for routine {}: {}",
                public_id, routine_id, e
            );
        }
    }

    match storage.deactivate_routine(routine_id).await {
        Ok(true) => {
            info!("Routine {} deactivated", routine_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                RoutineDeletedResponse {
                    deleted_routine: DeletedRoutine {
                        routine_id: routine.routine_id,
                        routine_title: routine.routine_title,
                        class_section_name: routine.class_section_name,
                    },
                },
                "Routine deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::RoutineNotFound,
            "Routine not found or already deleted",
        )),
        Err(e) => Ok(storage_failure(e, "Failed to delete routine")),
    }
}
