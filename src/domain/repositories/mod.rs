// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 爬虫配置仓库（crawler_repository）：读取租户保存的爬取配置
/// - 知识文件仓库（file_repository）：统计和写入知识文件记录
/// - 团队仓库（team_repository）：读取租户的订阅与密钥信息
/// - 存储仓库（storage_repository）：保存爬取输出的 blob
pub mod crawler_repository;
pub mod file_repository;
pub mod storage_repository;
pub mod team_repository;

use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}
