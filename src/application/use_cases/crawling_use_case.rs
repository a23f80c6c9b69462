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

use crate::{
    domain::{
        models::knowledge_file::KnowledgeFile,
        repositories::{
            crawler_repository::CrawlerRepository, file_repository::FileRepository,
            storage_repository::StorageRepository, team_repository::TeamRepository,
            RepositoryError,
        },
        services::{
            crawl_service::{CrawlError, CrawlService},
            ingestion_service::{IngestionError, IngestionService},
            knowledge_service::KnowledgeRegistry,
        },
    },
    engines::traits::ContentFetcher,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CrawlingUseCaseError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Crawler belongs to another team")]
    AccessDenied,
    #[error("Crawler not found")]
    NotFound,
    #[error("Plan allows at most {max_files} knowledge files")]
    QuotaExceeded { max_files: u64 },
    #[error("Missing OpenAI API key")]
    MissingApiKey,
    #[error("Stored crawler configuration is unusable: {0}")]
    InvalidConfig(String),
    #[error("Crawl produced no content")]
    EmptyContent,
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl CrawlingUseCaseError {
    /// 指标标签
    pub fn outcome(&self) -> &'static str {
        match self {
            CrawlingUseCaseError::Validation(_) => "invalid",
            CrawlingUseCaseError::AccessDenied => "forbidden",
            CrawlingUseCaseError::NotFound => "not_found",
            CrawlingUseCaseError::QuotaExceeded { .. } => "quota_exceeded",
            CrawlingUseCaseError::MissingApiKey => "missing_api_key",
            CrawlingUseCaseError::InvalidConfig(_) => "invalid_config",
            CrawlingUseCaseError::EmptyContent => "empty",
            CrawlingUseCaseError::Upstream(_) => "upstream_error",
            CrawlingUseCaseError::Repository(_) => "repository_error",
        }
    }
}

impl From<CrawlError> for CrawlingUseCaseError {
    fn from(e: CrawlError) -> Self {
        match e {
            CrawlError::InvalidSelector { .. } => {
                CrawlingUseCaseError::InvalidConfig(e.to_string())
            }
        }
    }
}

impl From<IngestionError> for CrawlingUseCaseError {
    fn from(e: IngestionError) -> Self {
        match e {
            IngestionError::EmptyContent => CrawlingUseCaseError::EmptyContent,
            IngestionError::Repository(e) => CrawlingUseCaseError::Repository(e),
            other => CrawlingUseCaseError::Upstream(other.to_string()),
        }
    }
}

/// 爬取用例
///
/// 处理一次“按已保存配置爬取并入库”的完整请求：权限、配额、密钥检查通过后
/// 才会发出任何抓取请求。
pub struct CrawlingUseCase<CR, FR, TR>
where
    FR: FileRepository,
{
    crawler_repo: Arc<CR>,
    file_repo: Arc<FR>,
    team_repo: Arc<TR>,
    crawl_service: CrawlService,
    ingestion: IngestionService<FR>,
}

impl<CR, FR, TR> CrawlingUseCase<CR, FR, TR>
where
    CR: CrawlerRepository + 'static,
    FR: FileRepository + 'static,
    TR: TeamRepository + 'static,
{
    pub fn new(
        crawler_repo: Arc<CR>,
        file_repo: Arc<FR>,
        team_repo: Arc<TR>,
        fetcher: Arc<dyn ContentFetcher>,
        storage: Arc<dyn StorageRepository>,
        registry: Arc<dyn KnowledgeRegistry>,
    ) -> Self {
        Self {
            crawler_repo,
            ingestion: IngestionService::new(storage, registry, file_repo.clone()),
            file_repo,
            team_repo,
            crawl_service: CrawlService::new(fetcher),
        }
    }

    /// 执行爬取并入库
    ///
    /// # 参数
    ///
    /// * `team_id` - 已认证的团队ID
    /// * `crawler_id` - 爬虫配置ID
    ///
    /// # 返回值
    ///
    /// * `Ok(KnowledgeFile)` - 新写入的知识文件记录
    /// * `Err(CrawlingUseCaseError)` - 任一检查或步骤失败
    pub async fn run(
        &self,
        team_id: Uuid,
        crawler_id: Uuid,
    ) -> Result<KnowledgeFile, CrawlingUseCaseError> {
        let started = Instant::now();
        let result = self.execute(team_id, crawler_id).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.outcome(),
        };
        metrics::counter!("crawl_runs_total", "outcome" => outcome).increment(1);
        metrics::histogram!("crawl_duration_seconds").record(started.elapsed().as_secs_f64());

        result
    }

    async fn execute(
        &self,
        team_id: Uuid,
        crawler_id: Uuid,
    ) -> Result<KnowledgeFile, CrawlingUseCaseError> {
        // 1. Load the crawler and check ownership
        let crawler = self
            .crawler_repo
            .find_by_id(crawler_id)
            .await?
            .ok_or(CrawlingUseCaseError::NotFound)?;
        if crawler.team_id != team_id {
            warn!(%team_id, %crawler_id, "Crawler requested by another team");
            return Err(CrawlingUseCaseError::AccessDenied);
        }

        let job = crawler
            .to_job()
            .map_err(|e| CrawlingUseCaseError::InvalidConfig(e.to_string()))?;

        // 2. Plan quota
        let team = self
            .team_repo
            .find_by_id(team_id)
            .await?
            .ok_or(CrawlingUseCaseError::AccessDenied)?;
        let plan = team.effective_plan(Utc::now());
        let file_count = self.file_repo.count_by_team(team_id).await?;
        if file_count >= plan.max_files() {
            info!(%team_id, plan = %plan, file_count, "Knowledge file quota reached");
            return Err(CrawlingUseCaseError::QuotaExceeded {
                max_files: plan.max_files(),
            });
        }

        // 3. Team's own API key
        let api_key = team
            .knowledge_api_key()
            .ok_or(CrawlingUseCaseError::MissingApiKey)?
            .to_string();

        // 4. Crawl
        info!(
            %crawler_id,
            seeds = job.seeds.len(),
            max_pages = job.max_pages,
            url_match = %job.url_match,
            "Starting crawl"
        );
        let output = self.crawl_service.crawl(&job).await?;

        // 5. Flush
        let file = self.ingestion.flush(&crawler, &api_key, &output).await?;
        info!(
            %crawler_id,
            file_id = %file.id,
            pages = output.len(),
            "Knowledge file created"
        );
        Ok(file)
    }
}

#[cfg(test)]
#[path = "crawling_use_case_test.rs"]
mod tests;
