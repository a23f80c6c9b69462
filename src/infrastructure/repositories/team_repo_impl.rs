// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::team::Team;
use crate::domain::repositories::team_repository::TeamRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::team as team_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 团队仓库实现
pub struct TeamRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl TeamRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeamRepository for TeamRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, RepositoryError> {
        let model = team_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(|m| Team {
            id: m.id,
            name: m.name,
            plan: m.plan,
            plan_period_end: m.plan_period_end.map(Into::into),
            openai_api_key: m.openai_api_key,
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        }))
    }
}
