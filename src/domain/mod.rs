// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：爬虫配置、页面结果、团队和知识文件
/// - 仓库接口（repositories）：数据持久化与 blob 存储抽象接口
/// - 服务（services）：遍历、链接发现、入库等领域服务
///
/// 领域层不依赖于任何基础设施实现。
pub mod models;
pub mod repositories;
pub mod services;
