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

use crate::domain::models::knowledge_file::KnowledgeFile;
use crate::domain::repositories::file_repository::FileRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::file as file_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 知识文件仓库实现
pub struct FileRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl FileRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<file_entity::Model> for KnowledgeFile {
    fn from(m: file_entity::Model) -> Self {
        KnowledgeFile {
            id: m.id,
            team_id: m.team_id,
            crawler_id: m.crawler_id,
            name: m.name,
            blob_url: m.blob_url,
            external_file_id: m.external_file_id,
            created_at: m.created_at.into(),
        }
    }
}

#[async_trait]
impl FileRepository for FileRepositoryImpl {
    async fn create(&self, file: &KnowledgeFile) -> Result<KnowledgeFile, RepositoryError> {
        let model = file_entity::ActiveModel {
            id: Set(file.id),
            team_id: Set(file.team_id),
            crawler_id: Set(file.crawler_id),
            name: Set(file.name.clone()),
            blob_url: Set(file.blob_url.clone()),
            external_file_id: Set(file.external_file_id.clone()),
            created_at: Set(file.created_at.into()),
        };

        model.insert(self.db.as_ref()).await?;
        Ok(file.clone())
    }

    async fn count_by_team(&self, team_id: Uuid) -> Result<u64, RepositoryError> {
        let count = file_entity::Entity::find()
            .filter(file_entity::Column::TeamId.eq(team_id))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    async fn find_by_team(&self, team_id: Uuid) -> Result<Vec<KnowledgeFile>, RepositoryError> {
        let models = file_entity::Entity::find()
            .filter(file_entity::Column::TeamId.eq(team_id))
            .order_by_asc(file_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(KnowledgeFile::from).collect())
    }
}
