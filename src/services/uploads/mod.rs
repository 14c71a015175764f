pub mod multipart;
pub mod serve;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

pub use multipart::{TempUpload, UploadForm, UploadRules, read_upload_form};

/// 本地公开文件的访问
pub struct UploadService;

impl UploadService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub async fn serve_upload(
        &self,
        request: &HttpRequest,
        relative: String,
    ) -> ActixResult<HttpResponse> {
        serve::serve_upload(self, request, relative).await
    }
}
