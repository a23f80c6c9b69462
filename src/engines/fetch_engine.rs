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
use reqwest::redirect::Policy;
use std::time::Instant;
use url::Url;

/// 最多跟随的重定向次数
const MAX_REDIRECTS: usize = 10;

/// 直接抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取引擎，对目标URL发起 GET 请求。
/// 重定向由引擎自行跟随，每一跳都重新做地址校验。
pub struct FetchEngine {
    client: reqwest::Client,
    allow_private_hosts: bool,
}

impl FetchEngine {
    /// 根据爬虫配置创建抓取引擎
    pub fn new(settings: &CrawlerSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.request_timeout())
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            allow_private_hosts: settings.allow_private_hosts,
        })
    }

    async fn check_target(&self, url: &str) -> Result<Url, EngineError> {
        if self.allow_private_hosts {
            validators::parse_http_url(url)
        } else {
            validators::validate_url(url).await
        }
    }

    /// 从已校验的入口地址开始请求，逐跳校验重定向目标
    async fn fetch_checked(&self, mut target: Url) -> Result<FetchedPage, EngineError> {
        let start = Instant::now();

        for _ in 0..=MAX_REDIRECTS {
            let response = self.client.get(target.clone()).send().await?;
            let status = response.status();

            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or(EngineError::HttpStatus(status.as_u16()))?;
                let next = target.join(location)?;
                target = self.check_target(next.as_str()).await?;
                continue;
            }

            if !status.is_success() {
                return Err(EngineError::HttpStatus(status.as_u16()));
            }

            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.trim().is_empty())
                .unwrap_or("text/html")
                .to_string();

            let content = response.text().await?;

            return Ok(FetchedPage {
                url: target.to_string(),
                status_code: status.as_u16(),
                content,
                content_type,
                response_time_ms: start.elapsed().as_millis() as u64,
            });
        }

        Err(EngineError::Other(format!(
            "too many redirects (more than {})",
            MAX_REDIRECTS
        )))
    }
}

#[async_trait]
impl ContentFetcher for FetchEngine {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchedPage)` - 抓取响应，`url` 为跟随重定向后的最终地址
    /// * `Err(EngineError)` - 抓取过程中出现的错误
    async fn fetch(&self, url: &str) -> Result<FetchedPage, EngineError> {
        let target = self.check_target(url).await?;
        self.fetch_checked(target).await
    }

    fn name(&self) -> &'static str {
        "fetch"
    }
}

#[cfg(test)]
#[path = "fetch_engine_test.rs"]
mod tests;
