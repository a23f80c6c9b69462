// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 团队数据库实体模型
///
/// 对应数据库中的 teams 表，存储订阅计划和团队自己的知识库密钥
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub plan: String,
    pub plan_period_end: Option<ChronoDateTimeWithTimeZone>,
    #[serde(skip_serializing)]
    pub openai_api_key: Option<String>,
    pub created_at: ChronoDateTimeWithTimeZone,
    pub updated_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        has_many = "super::api_key::Entity",
        from = "Column::Id",
        to = "super::api_key::Column::TeamId"
    )]
    ApiKeys,
    #[sea_orm(
        has_many = "super::crawler::Entity",
        from = "Column::Id",
        to = "super::crawler::Column::TeamId"
    )]
    Crawlers,
    #[sea_orm(
        has_many = "super::file::Entity",
        from = "Column::Id",
        to = "super::file::Column::TeamId"
    )]
    Files,
}

impl Related<super::api_key::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApiKeys.def()
    }
}

impl Related<super::crawler::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Crawlers.def()
    }
}

impl Related<super::file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Files.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
