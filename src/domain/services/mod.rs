// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务。
///
/// 包含的服务：
/// - 前沿（frontier）：已访问集合、待处理栈与页面预算
/// - 爬取服务（crawl_service）：深度优先遍历与页面文本提取
/// - 知识服务（knowledge_service）：外部检索索引的注册接口
/// - 入库服务（ingestion_service）：保存爬取输出并写入文件记录
pub mod crawl_service;
pub mod frontier;
pub mod ingestion_service;
pub mod knowledge_service;
