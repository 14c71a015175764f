pub mod create;
pub mod delete;
pub mod get;
pub mod summary;
pub mod sync;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    AttendanceExistsQuery, AttendanceFilter, AttendanceSyncRequest, BulkAttendanceRequest,
    CreateAttendanceRequest, MarkAttendanceRequest, UpdateAttendanceRequest,
};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
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

    pub async fn create_attendance(
        &self,
        request: &HttpRequest,
        attendance_data: CreateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_attendance(self, request, attendance_data).await
    }

    // 存在则更新，否则新建
    pub async fn mark_attendance(
        &self,
        request: &HttpRequest,
        mark_data: MarkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        create::mark_attendance(self, request, mark_data).await
    }

    pub async fn bulk_mark(
        &self,
        request: &HttpRequest,
        bulk_data: BulkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        create::bulk_mark(self, request, bulk_data).await
    }

    pub async fn list_attendance(
        &self,
        request: &HttpRequest,
        filter: AttendanceFilter,
    ) -> ActixResult<HttpResponse> {
        get::list_attendance(self, request, filter).await
    }

    pub async fn search_by_student(
        &self,
        request: &HttpRequest,
        first_name: String,
        roll_number: String,
        class_name: String,
        section: String,
    ) -> ActixResult<HttpResponse> {
        get::search_by_student(self, request, first_name, roll_number, class_name, section).await
    }

    pub async fn list_by_date(&self, request: &HttpRequest, date: String) -> ActixResult<HttpResponse> {
        get::list_by_date(self, request, date).await
    }

    pub async fn list_by_date_range(
        &self,
        request: &HttpRequest,
        start: String,
        end: String,
    ) -> ActixResult<HttpResponse> {
        get::list_by_date_range(self, request, start, end).await
    }

    pub async fn count_attendance(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::count_attendance(self, request).await
    }

    pub async fn statistics(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        summary::statistics(self, request).await
    }

    pub async fn check_exists(
        &self,
        request: &HttpRequest,
        query: AttendanceExistsQuery,
    ) -> ActixResult<HttpResponse> {
        get::check_exists(self, request, query).await
    }

    pub async fn student_summary(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        summary::student_summary(self, request, student_id).await
    }

    pub async fn class_date_summary(
        &self,
        request: &HttpRequest,
        class_id: i64,
        date: String,
    ) -> ActixResult<HttpResponse> {
        summary::class_date_summary(self, request, class_id, date).await
    }

    // 月度数据完整性校验
    pub async fn validate_sync(
        &self,
        request: &HttpRequest,
        sync_data: AttendanceSyncRequest,
    ) -> ActixResult<HttpResponse> {
        sync::validate_sync(self, request, sync_data).await
    }

    // 导出整月考勤映射
    pub async fn force_sync(
        &self,
        request: &HttpRequest,
        sync_data: AttendanceSyncRequest,
    ) -> ActixResult<HttpResponse> {
        sync::force_sync(self, request, sync_data).await
    }

    pub async fn get_attendance(
        &self,
        request: &HttpRequest,
        attendance_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_attendance(self, request, attendance_id).await
    }

    pub async fn update_attendance(
        &self,
        request: &HttpRequest,
        attendance_id: i64,
        update_data: UpdateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_attendance(self, request, attendance_id, update_data).await
    }

    pub async fn delete_attendance(
        &self,
        request: &HttpRequest,
        attendance_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_attendance(self, request, attendance_id).await
    }
}
