// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::use_cases::crawling_use_case::CrawlingUseCaseError;

impl From<&CrawlingUseCaseError> for StatusCode {
    fn from(err: &CrawlingUseCaseError) -> Self {
        match err {
            CrawlingUseCaseError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CrawlingUseCaseError::AccessDenied => StatusCode::FORBIDDEN,
            CrawlingUseCaseError::NotFound => StatusCode::NOT_FOUND,
            CrawlingUseCaseError::QuotaExceeded { .. } => StatusCode::PAYMENT_REQUIRED,
            CrawlingUseCaseError::MissingApiKey => StatusCode::BAD_REQUEST,
            CrawlingUseCaseError::InvalidConfig(_)
            | CrawlingUseCaseError::EmptyContent
            | CrawlingUseCaseError::Upstream(_)
            | CrawlingUseCaseError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 错误响应
///
/// 校验错误返回 JSON 错误信息；配额与密钥错误返回固定文本；
/// 其余错误只返回状态码，不向调用方暴露内部细节。
impl IntoResponse for CrawlingUseCaseError {
    fn into_response(self) -> Response {
        let status = StatusCode::from(&self);
        match self {
            CrawlingUseCaseError::Validation(msg) => {
                (status, Json(json!({ "error": msg }))).into_response()
            }
            CrawlingUseCaseError::QuotaExceeded { .. } => {
                (status, "Requires Higher Plan").into_response()
            }
            CrawlingUseCaseError::MissingApiKey => {
                (status, "Missing OpenAI API key").into_response()
            }
            _ => status.into_response(),
        }
    }
}
