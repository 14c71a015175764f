use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::declare_object_store_plugin;
use crate::errors::{Result, SchoolError};
use crate::object_store::{ObjectStore, StoredObject};

declare_object_store_plugin!("cloudinary", CloudinaryStore);

/// Cloudinary 签名上传
pub struct CloudinaryStore {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    #[serde(default)]
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

impl CloudinaryStore {
    pub fn new() -> std::result::Result<Self, String> {
        let config = &AppConfig::get().object_store.cloudinary;

        if config.cloud_name.is_empty() || config.api_key.is_empty() || config.api_secret.is_empty()
        {
            return Err("Cloudinary credentials are not configured".to_string());
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        info!("Cloudinary store initialized for cloud {}", config.cloud_name);

        Ok(Self {
            client,
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, resource_type: &str, action: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.api_base, self.cloud_name, resource_type, action
        )
    }
}

/// 请求签名：参数按名称排序后以 `k=v&...` 拼接，末尾追加 api secret，取 SHA-1 十六进制
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl ObjectStore for CloudinaryStore {
    fn name(&self) -> &'static str {
        "cloudinary"
    }

    async fn upload(&self, path: &Path, folder: &str, content_type: &str) -> Result<StoredObject> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("folder", folder), ("timestamp", &timestamp)],
            &self.api_secret,
        );

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type)?;
        let form = Form::new()
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature)
            .part("file", part);

        let response = self
            .client
            .post(self.endpoint("auto", "upload"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SchoolError::object_store(format!(
                "Cloudinary upload failed ({status}): {body}"
            )));
        }

        let uploaded: UploadResponse = response.json().await?;
        debug!("Uploaded {} to Cloudinary", uploaded.public_id);

        let format = uploaded.format.unwrap_or_else(|| {
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_ascii_lowercase()
        });

        Ok(StoredObject {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
            format,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<()> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("public_id", public_id), ("timestamp", &timestamp)],
            &self.api_secret,
        );

        let params = [
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp),
            ("api_key", self.api_key.clone()),
            ("signature", signature),
        ];

        // 以 auto 上传的 PDF 同样归入 image 资源类型
        let response = self
            .client
            .post(self.endpoint("image", "destroy"))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SchoolError::object_store(format!(
                "Cloudinary delete failed ({status}): {body}"
            )));
        }

        let destroyed: DestroyResponse = response.json().await?;
        match destroyed.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(SchoolError::object_store(format!(
                "Cloudinary delete of {public_id} returned {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sha1_hex(input: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(input.as_bytes());
        hex::encode(hasher.finalize())
    }

    #[test]
    fn test_sign_params_sorts_by_name() {
        let signature = sign_params(
            &[("timestamp", "1315060510"), ("folder", "school/routines")],
            "secret",
        );
        assert_eq!(
            signature,
            sha1_hex("folder=school/routines&timestamp=1315060510secret")
        );
    }

    #[test]
    fn test_sign_params_skips_empty_values() {
        let with_empty = sign_params(&[("folder", ""), ("timestamp", "1")], "s");
        let without = sign_params(&[("timestamp", "1")], "s");
        assert_eq!(with_empty, without);
        assert_eq!(without.len(), 40);
    }
}
