// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 抓取引擎模块
///
/// 提供直接抓取与阅读代理两种页面抓取实现
pub mod fetch_engine;
pub mod reader_engine;
pub mod traits;
pub mod validators;

use crate::config::settings::{CrawlerSettings, FetchMode};
use fetch_engine::FetchEngine;
use reader_engine::ReaderEngine;
use std::sync::Arc;
use traits::{ContentFetcher, EngineError};

/// 根据配置创建内容抓取器
pub fn create_fetcher(settings: &CrawlerSettings) -> Result<Arc<dyn ContentFetcher>, EngineError> {
    let fetcher: Arc<dyn ContentFetcher> = match settings.fetch_mode {
        FetchMode::Direct => Arc::new(FetchEngine::new(settings)?),
        FetchMode::Reader => Arc::new(ReaderEngine::new(settings)?),
    };
    Ok(fetcher)
}
