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

use crate::domain::models::crawler::CrawlJob;
use crate::domain::models::page::{CrawlOutput, PageResult};
use crate::domain::services::frontier::{Budget, Frontier};
use crate::engines::traits::ContentFetcher;
use crate::utils::url_utils::{is_absolute_http, resolve_url};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector is valid"));

/// 爬取错误类型
#[derive(Error, Debug)]
pub enum CrawlError {
    /// CSS 选择器无法解析
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// 爬取服务
///
/// 从种子URL出发做深度优先遍历，按选择器提取每页文本。
/// 单页抓取失败只跳过该页，不会中断整次爬取。
pub struct CrawlService {
    /// 页面抓取器
    fetcher: Arc<dyn ContentFetcher>,
}

impl CrawlService {
    /// 创建新的爬取服务实例
    ///
    /// # 参数
    ///
    /// * `fetcher` - 页面抓取器（直接抓取或阅读代理）
    pub fn new(fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self { fetcher }
    }

    /// 执行一次爬取
    ///
    /// # 参数
    ///
    /// * `job` - 由爬虫配置生成的爬取任务
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlOutput)` - 按访问顺序排列的页面结果，页数不超过预算
    /// * `Err(CrawlError)` - 选择器无效时返回错误，此时不会发出任何请求
    pub async fn crawl(&self, job: &CrawlJob) -> Result<CrawlOutput, CrawlError> {
        let selector = parse_selector(&job.selector)?;
        let started = Instant::now();

        let mut frontier = Frontier::new(&job.seeds, job.url_match.clone());
        let mut budget = Budget::new(job.max_pages);
        let mut output = CrawlOutput::default();

        while let Some(url) = frontier.next_url(&budget) {
            debug!(
                url = %url,
                pages = budget.pages(),
                max_pages = budget.max_pages(),
                "Crawling page"
            );

            let Some(html) = self.fetcher.fetch_content(&url).await else {
                continue;
            };
            metrics::counter!("crawl_pages_fetched_total", "engine" => self.fetcher.name())
                .increment(1);

            // Html is not Send; parse in a sync helper so it never lives across an await
            let parsed = LinkDiscoverer::parse_page(&html, &url, &selector);
            debug!(url = %url, links = parsed.links.len(), "Discovered links");

            output.pages.push(PageResult {
                url,
                title: parsed.title,
                text: parsed.text,
            });
            budget.record_page();
            frontier.push_links(parsed.links);
        }

        info!(
            pages = output.len(),
            visited = frontier.visited().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            engine = self.fetcher.name(),
            "Crawl finished"
        );
        Ok(output)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, CrawlError> {
    Selector::parse(selector).map_err(|e| CrawlError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// 解析后的单个页面
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    pub title: String,
    pub text: String,
    pub links: Vec<String>,
}

/// 链接发现器
///
/// 负责从HTML内容中提取标题、选中文本和后续链接
pub struct LinkDiscoverer;

impl LinkDiscoverer {
    /// 一次解析同时提取标题、文本和链接
    pub fn parse_page(html_content: &str, page_url: &str, selector: &Selector) -> ParsedPage {
        let document = Html::parse_document(html_content);
        let base = Url::parse(page_url).ok();
        ParsedPage {
            title: title_of(&document),
            text: selection_of(&document, selector),
            links: links_of(&document, base.as_ref()),
        }
    }
}

fn title_of(document: &Html) -> String {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn selection_of(document: &Html, selector: &Selector) -> String {
    let raw: Vec<&str> = document
        .select(selector)
        .flat_map(|el| el.text())
        .collect();
    raw.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

fn links_of(document: &Html, base: Option<&Url>) -> Vec<String> {
    let mut links = Vec::new();

    for element in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();

        let link = if href.starts_with('/') {
            match base.map(|b| resolve_url(b, href)) {
                Some(Ok(url)) => url.to_string(),
                _ => continue,
            }
        } else {
            href.to_string()
        };

        // Relative paths without a leading slash, mailto: and javascript: are dropped
        if is_absolute_http(&link) {
            links.push(link);
        }
    }

    links
}

#[cfg(test)]
#[path = "crawl_service_test.rs"]
mod tests;
