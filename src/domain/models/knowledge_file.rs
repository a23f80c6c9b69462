// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 知识文件记录
///
/// 一次爬取输出落盘并注册到检索后端后生成，创建后不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeFile {
    /// 记录唯一标识符
    pub id: Uuid,
    /// 所属团队ID
    pub team_id: Uuid,
    /// 来源爬虫配置（上传文件时为空）
    pub crawler_id: Option<Uuid>,
    /// 文件名
    pub name: String,
    /// blob 的公开URL
    pub blob_url: String,
    /// 检索后端返回的文件ID
    pub external_file_id: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}
