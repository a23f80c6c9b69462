// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// 默认内容选择器（整个 body）
pub const DEFAULT_SELECTOR: &str = "body";

/// 默认最大抓取页数
pub const DEFAULT_MAX_PAGES: i32 = 25;

/// 爬虫配置实体
///
/// 租户保存的爬取配置，每次触发爬取时据此生成一次性的 [`CrawlJob`]。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Crawler {
    /// 爬虫唯一标识符
    pub id: Uuid,
    /// 所属团队ID，用于权限隔离和数据归属
    pub team_id: Uuid,
    /// 显示名称，同时用于生成知识文件名
    #[validate(length(min = 3, max = 32))]
    pub name: String,
    /// 种子URL，可以是单个URL或逗号分隔的URL列表
    #[validate(length(min = 1))]
    pub crawl_url: String,
    /// URL 必须包含的子串
    #[validate(length(min = 1))]
    pub url_match: String,
    /// 保留文本的 CSS 选择器
    pub selector: String,
    /// 最大抓取页数
    #[validate(range(min = 1))]
    pub max_pages_to_crawl: i32,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
}

/// 爬虫配置无法生成爬取任务时的错误
#[derive(Error, Debug)]
pub enum CrawlJobError {
    #[error("invalid crawler configuration: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("crawler configuration has no seed URL")]
    NoSeeds,
}

impl Crawler {
    /// 使用默认选择器和页数上限创建新的爬虫配置
    pub fn new(
        team_id: Uuid,
        name: impl Into<String>,
        crawl_url: impl Into<String>,
        url_match: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            team_id,
            name: name.into(),
            crawl_url: crawl_url.into(),
            url_match: url_match.into(),
            selector: DEFAULT_SELECTOR.to_string(),
            max_pages_to_crawl: DEFAULT_MAX_PAGES,
            created_at: now,
            updated_at: now,
        }
    }

    /// 拆分种子URL
    ///
    /// 按逗号拆分、去除首尾空白并丢弃空项，保持原有顺序
    pub fn seed_urls(&self) -> Vec<String> {
        self.crawl_url
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// 校验配置并生成本次爬取任务
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlJob)` - 不可变的爬取任务
    /// * `Err(CrawlJobError)` - 配置校验失败或没有种子URL
    pub fn to_job(&self) -> Result<CrawlJob, CrawlJobError> {
        self.validate()?;

        let seeds = self.seed_urls();
        if seeds.is_empty() {
            return Err(CrawlJobError::NoSeeds);
        }

        let selector = if self.selector.trim().is_empty() {
            DEFAULT_SELECTOR.to_string()
        } else {
            self.selector.clone()
        };

        Ok(CrawlJob {
            seeds,
            url_match: self.url_match.clone(),
            selector,
            max_pages: self.max_pages_to_crawl as usize,
        })
    }
}

/// 爬取任务
///
/// 一次爬取调用的输入，开始后不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlJob {
    /// 有序种子URL
    pub seeds: Vec<String>,
    /// URL 必须包含的子串
    pub url_match: String,
    /// 内容选择器
    pub selector: String,
    /// 结果集中页面数量的上限
    pub max_pages: usize,
}
