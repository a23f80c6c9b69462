// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::CrawlerSettings;
use crate::engines::traits::{ContentFetcher, EngineError, FetchedPage};
use crate::engines::validators;
use async_trait::async_trait;
use std::time::Instant;

/// 阅读代理抓取引擎
///
/// 通过第三方阅读代理（如 `r.jina.ai`）在服务端渲染目标页面。
/// 请求 HTML 格式返回，使链接发现和选择器提取与直接抓取保持一致。
pub struct ReaderEngine {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ReaderEngine {
    /// 根据爬虫配置创建代理抓取引擎
    pub fn new(settings: &CrawlerSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: settings.reader_base_url.trim_end_matches('/').to_string(),
            api_key: settings
                .reader_api_key
                .clone()
                .filter(|k| !k.trim().is_empty()),
        })
    }

    /// 构造代理请求地址
    pub fn proxy_url(&self, target: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(target))
    }
}

#[async_trait]
impl ContentFetcher for ReaderEngine {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, EngineError> {
        // The proxy performs the network access, only the scheme is checked here
        validators::parse_http_url(url)?;

        let mut request = self
            .client
            .get(self.proxy_url(url))
            .header("X-Return-Format", "html");
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let start = Instant::now();
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_string();
        let content = response.text().await?;

        Ok(FetchedPage {
            url: url.to_string(),
            status_code: status.as_u16(),
            content,
            content_type,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn name(&self) -> &'static str {
        "reader"
    }
}
