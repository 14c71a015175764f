use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AdminService;
use crate::middlewares::RequireJWT;
use crate::models::ErrorCode;
use crate::models::{ApiResponse, admins::AdminRole};
use crate::services::common::{bad_request, not_found, storage_failure};

pub async fn delete_admin(
    service: &AdminService,
    request: &HttpRequest,
    admin_id: i64,
) -> ActixResult<HttpResponse> {
    if RequireJWT::extract_admin_id(request) == Some(admin_id) {
        return Ok(bad_request("You cannot delete your own account"));
    }

    let storage = service.get_storage(request);

    let target = match storage.get_admin_by_id(admin_id).await {
        Ok(Some(admin)) => admin,
        Ok(None) => return Ok(not_found(ErrorCode::AdminNotFound, "Admin not found")),
        Err(e) => return Ok(storage_failure(e, "Failed to load admin")),
    };

    // 至少保留一个 admin 角色的账号
    if target.role == AdminRole::Admin {
        match storage.count_admins(Some(AdminRole::Admin)).await {
            Ok(count) if count <= 1 => {
                return Ok(bad_request("Cannot delete the last admin"));
            }
            Ok(_) => {}
            Err(e) => return Ok(storage_failure(e, "Failed to count admins")),
        }
    }

    match storage.delete_admin(admin_id).await {
        Ok(true) => {
            service.invalidate_sessions(request).await;
            info!("Admin {} deleted", target.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Admin deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::AdminNotFound, "Admin not found")),
        Err(e) => Ok(storage_failure(e, "Failed to delete admin")),
    }
}
