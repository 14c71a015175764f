pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exams::requests::{
    CreateExamByClassRequest, CreateExamRequest, ExamSearchQuery, UpcomingExamQuery,
    UpdateExamRequest,
};
use crate::storage::Storage;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
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

    pub async fn list_exams(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_exams(self, request).await
    }

    // 按班级 ID 创建考试
    pub async fn create_exam(
        &self,
        request: &HttpRequest,
        exam_data: CreateExamRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam(self, request, exam_data).await
    }

    // 按班级名称与分部创建考试
    pub async fn create_exam_by_class(
        &self,
        request: &HttpRequest,
        exam_data: CreateExamByClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam_by_class(self, request, exam_data).await
    }

    pub async fn search_exams(
        &self,
        request: &HttpRequest,
        query: ExamSearchQuery,
    ) -> ActixResult<HttpResponse> {
        get::search_exams(self, request, query).await
    }

    // 未来若干天内的考试
    pub async fn upcoming_exams(
        &self,
        request: &HttpRequest,
        query: UpcomingExamQuery,
    ) -> ActixResult<HttpResponse> {
        get::upcoming_exams(self, request, query).await
    }

    pub async fn list_by_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::list_by_class(self, request, class_id).await
    }

    pub async fn get_exam(&self, request: &HttpRequest, exam_id: i64) -> ActixResult<HttpResponse> {
        get::get_exam(self, request, exam_id).await
    }

    pub async fn update_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        update_data: UpdateExamRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_exam(self, request, exam_id, update_data).await
    }

    pub async fn delete_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_exam(self, request, exam_id).await
    }
}
