pub mod create;
pub mod delete;
pub mod get;
pub mod summary;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::PaginationQuery;
use crate::models::results::requests::{
    AddResultByDetailsRequest, AdvancedResultQuery, BatchResultRequest, CheckResultQuery,
    CreateResultRequest, ResultSearchQuery, UpdateResultRequest,
};
use crate::storage::Storage;

pub struct ResultService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultService {
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

    pub async fn list_results(
        &self,
        request: &HttpRequest,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        get::list_results(self, request, query).await
    }

    pub async fn create_result(
        &self,
        request: &HttpRequest,
        result_data: CreateResultRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_result(self, request, result_data).await
    }

    // 通过学生姓名/学号、班级、考试与科目名称录入成绩
    pub async fn add_result_by_details(
        &self,
        request: &HttpRequest,
        details: AddResultByDetailsRequest,
    ) -> ActixResult<HttpResponse> {
        create::add_result_by_details(self, request, details).await
    }

    pub async fn create_results_batch(
        &self,
        request: &HttpRequest,
        batch: BatchResultRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_results_batch(self, request, batch).await
    }

    pub async fn count_results(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::count_results(self, request).await
    }

    pub async fn search_results(
        &self,
        request: &HttpRequest,
        query: ResultSearchQuery,
    ) -> ActixResult<HttpResponse> {
        get::search_results(self, request, query).await
    }

    pub async fn advanced_search(
        &self,
        request: &HttpRequest,
        query: AdvancedResultQuery,
    ) -> ActixResult<HttpResponse> {
        get::advanced_search(self, request, query).await
    }

    pub async fn check_exists(
        &self,
        request: &HttpRequest,
        query: CheckResultQuery,
    ) -> ActixResult<HttpResponse> {
        get::check_exists(self, request, query).await
    }

    pub async fn get_result(
        &self,
        request: &HttpRequest,
        result_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_result(self, request, result_id).await
    }

    pub async fn student_exam_summary(
        &self,
        request: &HttpRequest,
        student_id: i64,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        summary::student_exam_summary(self, request, student_id, exam_id).await
    }

    pub async fn class_exam_summary(
        &self,
        request: &HttpRequest,
        class_id: i64,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        summary::class_exam_summary(self, request, class_id, exam_id).await
    }

    pub async fn update_result(
        &self,
        request: &HttpRequest,
        result_id: i64,
        update_data: UpdateResultRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_result(self, request, result_id, update_data).await
    }

    pub async fn delete_result(
        &self,
        request: &HttpRequest,
        result_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_result(self, request, result_id).await
    }

    pub async fn delete_by_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_by_exam(self, request, exam_id).await
    }
}
