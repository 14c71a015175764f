pub mod create;
pub mod delete;
pub mod get;
pub mod search;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{
    CheckRollQuery, CreateStudentRequest, StudentListQuery, StudentSearchQuery,
    UpdateStudentRequest,
};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    // 分页获取学生列表
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentListQuery,
    ) -> ActixResult<HttpResponse> {
        get::list_students(self, request, query).await
    }

    // 新增学生，班级不存在时自动创建
    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student_data: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, student_data).await
    }

    pub async fn count_students(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::count_students(self, request).await
    }

    pub async fn search_students(
        &self,
        request: &HttpRequest,
        query: StudentSearchQuery,
    ) -> ActixResult<HttpResponse> {
        search::search_students(self, request, query).await
    }

    // 班级内学号查重
    pub async fn check_roll(
        &self,
        request: &HttpRequest,
        query: CheckRollQuery,
    ) -> ActixResult<HttpResponse> {
        search::check_roll(self, request, query).await
    }

    // 某班级（可限定分部）的学生
    pub async fn list_by_class(
        &self,
        request: &HttpRequest,
        class_name: String,
        section: Option<String>,
    ) -> ActixResult<HttpResponse> {
        search::list_by_class(self, request, class_name, section).await
    }

    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, request, student_id).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        update_data: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, student_id, update_data).await
    }

    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id).await
    }
}
