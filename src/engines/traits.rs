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

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 非成功状态码
    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),
    /// URL 无法解析
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// 目标地址被 SSRF 保护拦截
    #[error("SSRF protection: {0}")]
    Blocked(String),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 抓取到的页面
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// 最终响应的URL
    pub url: String,
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容
    pub content: String,
    /// 内容类型
    pub content_type: String,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

/// 内容抓取特质
///
/// 直接抓取与代理抓取两种实现由配置选择，测试中可替换为返回固定 HTML 的假实现。
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// 抓取页面
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchedPage)` - 成功状态码的响应
    /// * `Err(EngineError)` - 网络失败或非成功状态码
    async fn fetch(&self, url: &str) -> Result<FetchedPage, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;

    /// 抓取页面内容，失败时返回 `None`
    ///
    /// 单个页面失败只记录日志，由调用方跳过该页继续爬取。
    async fn fetch_content(&self, url: &str) -> Option<String> {
        match self.fetch(url).await {
            Ok(page) => {
                debug!(
                    engine = self.name(),
                    url,
                    final_url = %page.url,
                    status = page.status_code,
                    content_type = %page.content_type,
                    elapsed_ms = page.response_time_ms,
                    "Fetched page"
                );
                Some(page.content)
            }
            Err(e) => {
                warn!(engine = self.name(), url, error = %e, "Failed to fetch page");
                metrics::counter!("crawl_fetch_failures_total", "engine" => self.name())
                    .increment(1);
                None
            }
        }
    }
}
