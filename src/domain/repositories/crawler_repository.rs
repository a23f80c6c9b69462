// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::crawler::Crawler;
use async_trait::async_trait;
use uuid::Uuid;

/// 爬虫配置仓库特质
#[async_trait]
pub trait CrawlerRepository: Send + Sync {
    /// 保存爬虫配置
    ///
    /// # 参数
    ///
    /// * `crawler` - 要保存的爬虫配置
    ///
    /// # 返回值
    ///
    /// * `Ok(Crawler)` - 保存后的配置
    /// * `Err(RepositoryError)` - 保存失败时返回错误
    async fn create(&self, crawler: &Crawler) -> Result<Crawler, RepositoryError>;

    /// 根据ID查找爬虫配置
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(Crawler))` - 找到配置
    /// * `Ok(None)` - 配置不存在
    /// * `Err(RepositoryError)` - 查询失败时返回错误
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Crawler>, RepositoryError>;
}
