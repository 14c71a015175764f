//! 路径参数安全提取器
//!
//! 非数字或非正数的 ID 在进入处理函数之前就返回 400。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_i64(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(param).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(InternalError::from_response(
            format!("invalid path parameter {param}"),
            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid {param}: '{raw}' is not a positive integer"),
            )),
        )
        .into()),
    }
}

macro_rules! define_safe_i64_extractor {
    ($(#[$meta:meta])* $name:ident, $param:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_positive_i64(req, $param).map($name))
            }
        }
    };
}

define_safe_i64_extractor!(
    /// 通用 `{id}` 参数
    SafeIDI64,
    "id"
);
define_safe_i64_extractor!(SafeClassIdI64, "class_id");
define_safe_i64_extractor!(SafeStudentIdI64, "student_id");
define_safe_i64_extractor!(SafeExamIdI64, "exam_id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_positive_id_accepted() {
        let (req, mut payload) = TestRequest::default()
            .param("id", "42")
            .to_http_parts();
        let id = SafeIDI64::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(id, SafeIDI64(42));
    }

    #[actix_web::test]
    async fn test_invalid_ids_rejected_with_400() {
        for raw in ["abc", "0", "-3", "1.5", ""] {
            let (req, mut payload) = TestRequest::default()
                .param("class_id", raw)
                .to_http_parts();
            let err = SafeClassIdI64::from_request(&req, &mut payload)
                .await
                .unwrap_err();
            assert_eq!(
                err.as_response_error().status_code(),
                actix_web::http::StatusCode::BAD_REQUEST,
                "{raw} should be rejected"
            );
        }
    }
}
