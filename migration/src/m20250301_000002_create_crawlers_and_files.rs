// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::m20250301_000001_create_tenants_and_keys::Teams;
use sea_orm_migration::prelude::*;

/// 爬虫配置与知识文件表迁移
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Crawlers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Crawlers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Crawlers::TeamId).uuid().not_null())
                    .col(ColumnDef::new(Crawlers::Name).string().not_null())
                    .col(ColumnDef::new(Crawlers::CrawlUrl).text().not_null())
                    .col(ColumnDef::new(Crawlers::UrlMatch).string().not_null())
                    .col(
                        ColumnDef::new(Crawlers::Selector)
                            .string()
                            .not_null()
                            .default("body"),
                    )
                    .col(
                        ColumnDef::new(Crawlers::MaxPagesToCrawl)
                            .integer()
                            .not_null()
                            .default(25),
                    )
                    .col(
                        ColumnDef::new(Crawlers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Crawlers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_crawlers_team")
                            .from(Crawlers::Table, Crawlers::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Files::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Files::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Files::TeamId).uuid().not_null())
                    .col(ColumnDef::new(Files::CrawlerId).uuid())
                    .col(ColumnDef::new(Files::Name).string().not_null())
                    .col(ColumnDef::new(Files::BlobUrl).text().not_null())
                    .col(ColumnDef::new(Files::ExternalFileId).string().not_null())
                    .col(
                        ColumnDef::new(Files::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_files_team")
                            .from(Files::Table, Files::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_files_crawler")
                            .from(Files::Table, Files::CrawlerId)
                            .to(Crawlers::Table, Crawlers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Quota checks count files per team
        manager
            .create_index(
                Index::create()
                    .name("idx_files_team")
                    .table(Files::Table)
                    .col(Files::TeamId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Files::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Crawlers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Crawlers {
    Table,
    Id,
    TeamId,
    Name,
    CrawlUrl,
    UrlMatch,
    Selector,
    MaxPagesToCrawl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Files {
    Table,
    Id,
    TeamId,
    CrawlerId,
    Name,
    BlobUrl,
    ExternalFileId,
    CreatedAt,
}
