// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::knowledge_file::KnowledgeFile;
use async_trait::async_trait;
use uuid::Uuid;

/// 知识文件仓库特质
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// 写入知识文件记录
    async fn create(&self, file: &KnowledgeFile) -> Result<KnowledgeFile, RepositoryError>;

    /// 统计团队已有的知识文件数量，用于订阅配额检查
    async fn count_by_team(&self, team_id: Uuid) -> Result<u64, RepositoryError>;

    /// 按创建时间列出团队的知识文件
    async fn find_by_team(&self, team_id: Uuid) -> Result<Vec<KnowledgeFile>, RepositoryError>;
}
