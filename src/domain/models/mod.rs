// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 包含爬虫配置、爬取结果、团队订阅和知识文件等核心实体
pub mod crawler;
pub mod knowledge_file;
pub mod page;
pub mod team;
