// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawler::Crawler;
use crate::domain::models::knowledge_file::KnowledgeFile;
use crate::domain::models::page::CrawlOutput;
use crate::domain::repositories::file_repository::FileRepository;
use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};
use crate::domain::repositories::RepositoryError;
use crate::domain::services::knowledge_service::{KnowledgeError, KnowledgeRegistry};
use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").expect("whitespace regex is valid"));

/// 知识文件的内容类型
pub const KNOWLEDGE_CONTENT_TYPE: &str = "application/json";

/// 入库错误类型
#[derive(Error, Debug)]
pub enum IngestionError {
    /// 所有页面文本均为空白
    #[error("Crawl produced no content")]
    EmptyContent,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 生成知识文件名
///
/// 显示名转小写，每个空白字符替换为 `-`，再附加 UTC 时间戳（毫秒精度）。
pub fn knowledge_file_name(display_name: &str, now: DateTime<Utc>) -> String {
    let slug = WHITESPACE.replace_all(&display_name.to_lowercase(), "-").into_owned();
    format!(
        "{}-{}.json",
        slug,
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// 入库服务
///
/// 把一次爬取的输出写入 blob 存储、登记到知识库，并记录文件元数据。
/// 任何一步失败都不会写入文件记录。
pub struct IngestionService<FR: FileRepository> {
    storage: Arc<dyn StorageRepository>,
    registry: Arc<dyn KnowledgeRegistry>,
    file_repo: Arc<FR>,
}

impl<FR: FileRepository> IngestionService<FR> {
    pub fn new(
        storage: Arc<dyn StorageRepository>,
        registry: Arc<dyn KnowledgeRegistry>,
        file_repo: Arc<FR>,
    ) -> Self {
        Self {
            storage,
            registry,
            file_repo,
        }
    }

    /// 刷写爬取输出
    ///
    /// # 参数
    ///
    /// * `crawler` - 产生输出的爬虫配置
    /// * `api_key` - 团队的知识库 API 密钥
    /// * `output` - 爬取输出
    ///
    /// # 返回值
    ///
    /// * `Ok(KnowledgeFile)` - 新写入的知识文件记录
    /// * `Err(IngestionError)` - 输出为空或任一外部步骤失败
    pub async fn flush(
        &self,
        crawler: &Crawler,
        api_key: &str,
        output: &CrawlOutput,
    ) -> Result<KnowledgeFile, IngestionError> {
        if output.is_blank() {
            return Err(IngestionError::EmptyContent);
        }

        let now = Utc::now();
        let name = knowledge_file_name(&crawler.name, now);
        let data = output.to_json_bytes()?;
        let key = format!("{}/{}", crawler.team_id, name);

        let blob_url = self
            .storage
            .put(&key, &data, KNOWLEDGE_CONTENT_TYPE)
            .await?;
        info!(key = %key, bytes = data.len(), "Stored crawl output");

        let external_file_id = self.registry.upload_file(api_key, &name, data).await?;
        info!(file_id = %external_file_id, "Registered knowledge file");

        let file = KnowledgeFile {
            id: Uuid::new_v4(),
            team_id: crawler.team_id,
            crawler_id: Some(crawler.id),
            name,
            blob_url,
            external_file_id,
            created_at: now,
        };

        Ok(self.file_repo.create(&file).await?)
    }
}

#[cfg(test)]
#[path = "ingestion_service_test.rs"]
mod tests;
