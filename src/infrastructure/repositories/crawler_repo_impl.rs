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

use crate::domain::models::crawler::Crawler;
use crate::domain::repositories::crawler_repository::CrawlerRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::crawler as crawler_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 爬虫配置仓库实现
pub struct CrawlerRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl CrawlerRepositoryImpl {
    /// 创建新的爬虫配置仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<crawler_entity::Model> for Crawler {
    fn from(m: crawler_entity::Model) -> Self {
        Crawler {
            id: m.id,
            team_id: m.team_id,
            name: m.name,
            crawl_url: m.crawl_url,
            url_match: m.url_match,
            selector: m.selector,
            max_pages_to_crawl: m.max_pages_to_crawl,
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        }
    }
}

#[async_trait]
impl CrawlerRepository for CrawlerRepositoryImpl {
    async fn create(&self, crawler: &Crawler) -> Result<Crawler, RepositoryError> {
        let model = crawler_entity::ActiveModel {
            id: Set(crawler.id),
            team_id: Set(crawler.team_id),
            name: Set(crawler.name.clone()),
            crawl_url: Set(crawler.crawl_url.clone()),
            url_match: Set(crawler.url_match.clone()),
            selector: Set(crawler.selector.clone()),
            max_pages_to_crawl: Set(crawler.max_pages_to_crawl),
            created_at: Set(crawler.created_at.into()),
            updated_at: Set(crawler.updated_at.into()),
        };

        model.insert(self.db.as_ref()).await?;
        Ok(crawler.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Crawler>, RepositoryError> {
        let model = crawler_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Crawler::from))
    }
}
