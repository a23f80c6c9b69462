// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::KnowledgeSettings;
use crate::domain::services::knowledge_service::{KnowledgeError, KnowledgeRegistry};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// 上传用途，文件用于助手检索
const FILE_PURPOSE: &str = "assistants";

#[derive(Debug, Deserialize)]
struct UploadedFile {
    id: String,
}

/// OpenAI Files API 实现
///
/// 以团队自己的密钥调用 `POST {api_base_url}/files`
pub struct OpenAiFileService {
    /// HTTP 客户端
    client: reqwest::Client,
    /// API 基础地址
    base_url: String,
}

impl OpenAiFileService {
    /// 创建新的文件上传服务
    pub fn new(settings: &KnowledgeSettings) -> Result<Self, KnowledgeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| KnowledgeError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl KnowledgeRegistry for OpenAiFileService {
    async fn upload_file(
        &self,
        api_key: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<String, KnowledgeError> {
        let part = Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str("application/json")
            .map_err(|e| KnowledgeError::Request(e.to_string()))?;
        let form = Form::new().text("purpose", FILE_PURPOSE).part("file", part);

        let response = self
            .client
            .post(format!("{}/files", self.base_url))
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| KnowledgeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KnowledgeError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let uploaded: UploadedFile = response
            .json()
            .await
            .map_err(|e| KnowledgeError::InvalidResponse(e.to_string()))?;
        debug!(file_id = %uploaded.id, file_name, "Uploaded knowledge file");
        Ok(uploaded.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(server: &MockServer) -> OpenAiFileService {
        OpenAiFileService::new(&KnowledgeSettings {
            api_base_url: format!("{}/v1/", server.uri()),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_file_returns_external_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/files"))
            .and(header("authorization", "Bearer sk-team"))
            .and(body_string_contains("assistants"))
            .and(body_string_contains("club-docs.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "file-abc123",
                "object": "file",
                "purpose": "assistants"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let id = service(&server)
            .upload_file("sk-team", "club-docs.json", b"{\"pages\":[]}".to_vec())
            .await
            .unwrap();

        assert_eq!(id, "file-abc123");
    }

    #[tokio::test]
    async fn test_upload_file_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/files"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Incorrect API key"))
            .mount(&server)
            .await;

        let result = service(&server)
            .upload_file("sk-bad", "club-docs.json", b"{}".to_vec())
            .await;

        match result {
            Err(KnowledgeError::Rejected { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "Incorrect API key");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_file_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/files"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = service(&server)
            .upload_file("sk-team", "club-docs.json", b"{}".to_vec())
            .await;

        assert!(matches!(result, Err(KnowledgeError::InvalidResponse(_))));
    }
}
