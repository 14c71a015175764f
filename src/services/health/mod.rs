use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::warn;

use crate::models::{ApiResponse, AppStartTime, ErrorCode, HealthResponse};
use crate::storage::Storage;

pub struct HealthService {
    storage: Option<Arc<dyn Storage>>,
}

impl HealthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            super::common::storage_from(request)
        }
    }

    /// 数据库不可用时返回 503
    pub async fn check(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        let uptime_secs = request
            .app_data::<web::Data<AppStartTime>>()
            .map(|start| (chrono::Utc::now() - start.start_datetime).num_seconds())
            .unwrap_or_default();

        match storage.ping().await {
            Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                HealthResponse {
                    status: "ok".to_string(),
                    database: "connected".to_string(),
                    uptime_secs,
                },
                "Service is healthy",
            ))),
            Err(e) => {
                warn!("Health check failed: {}", e);
                Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error(
                    ErrorCode::InternalServerError,
                    HealthResponse {
                        status: "degraded".to_string(),
                        database: "disconnected".to_string(),
                        uptime_secs,
                    },
                    "Database is unreachable",
                )))
            }
        }
    }
}
