// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 单个页面的抓取结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// 页面URL
    pub url: String,
    /// 页面 `<title>` 文本
    pub title: String,
    /// 选择器命中区域的文本
    pub text: String,
}

/// 一次爬取的完整输出
///
/// 序列化后的 JSON 形如 `{ "pages": [{ "url", "title", "text" }] }`，
/// 整个文档作为一个知识文件交给检索索引。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlOutput {
    /// 按遍历顺序排列的页面
    pub pages: Vec<PageResult>,
}

impl CrawlOutput {
    /// 页面数量
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// 是否没有任何页面
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// 所有页面的文本拼接后是否只有空白
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.text.trim().is_empty())
    }

    /// 序列化为 JSON 字节
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }

    /// 从 JSON 字节反序列化
    pub fn from_json_slice(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }
}
