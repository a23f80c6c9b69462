// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::team::Team;
use async_trait::async_trait;
use uuid::Uuid;

/// 团队仓库特质
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// 根据ID查找团队
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, RepositoryError>;
}
