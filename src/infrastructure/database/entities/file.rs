// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 知识文件数据库实体模型
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub team_id: Uuid,
    pub crawler_id: Option<Uuid>,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub blob_url: String,
    pub external_file_id: String,
    pub created_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id"
    )]
    Team,
    #[sea_orm(
        belongs_to = "super::crawler::Entity",
        from = "Column::CrawlerId",
        to = "super::crawler::Column::Id",
        on_delete = "SetNull"
    )]
    Crawler,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::crawler::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Crawler.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
