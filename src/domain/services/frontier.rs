// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

/// 判断URL是否应当访问
///
/// 已访问、不包含匹配子串或页面预算已用完时返回 `false`。
/// URL 不做任何规范化，仅末尾斜杠不同的两个URL视为不同页面。
pub fn should_visit(
    url: &str,
    visited: &HashSet<String>,
    pattern: &str,
    pages_so_far: usize,
    max_pages: usize,
) -> bool {
    pages_so_far < max_pages && !visited.contains(url) && url.contains(pattern)
}

/// 页面预算
///
/// 对整次爬取（而非单个分支）的结果页面数设置硬上限
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    max_pages: usize,
    pages: usize,
}

impl Budget {
    pub fn new(max_pages: usize) -> Self {
        Self {
            max_pages,
            pages: 0,
        }
    }

    /// 已计入结果的页面数
    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn is_exhausted(&self) -> bool {
        self.pages >= self.max_pages
    }

    /// 记录一个计入结果的页面
    pub fn record_page(&mut self) {
        self.pages += 1;
    }
}

/// URL 前沿
///
/// 以栈保存待处理URL，按深度优先先序遍历：种子按给定顺序、
/// 每页链接按发现顺序出栈。出栈即标记为已访问，子页面回链不会重复抓取。
#[derive(Debug)]
pub struct Frontier {
    visited: HashSet<String>,
    pending: Vec<String>,
    url_match: String,
}

impl Frontier {
    /// 使用种子URL创建前沿
    pub fn new(seeds: &[String], url_match: impl Into<String>) -> Self {
        let mut frontier = Self {
            visited: HashSet::new(),
            pending: Vec::new(),
            url_match: url_match.into(),
        };
        frontier.push_links(seeds.to_vec());
        frontier
    }

    /// 压入一页发现的链接
    ///
    /// 已访问或不匹配的链接直接丢弃
    pub fn push_links(&mut self, links: Vec<String>) {
        let candidates: Vec<String> = links
            .into_iter()
            .filter(|link| !self.visited.contains(link) && link.contains(&self.url_match))
            .collect();
        self.pending.extend(candidates.into_iter().rev());
    }

    /// 取出下一个应当访问的URL并标记为已访问
    ///
    /// 预算用完或没有待处理URL时返回 `None`
    pub fn next_url(&mut self, budget: &Budget) -> Option<String> {
        while let Some(url) = self.pending.pop() {
            if budget.is_exhausted() {
                return None;
            }
            if should_visit(
                &url,
                &self.visited,
                &self.url_match,
                budget.pages(),
                budget.max_pages(),
            ) {
                self.visited.insert(url.clone());
                return Some(url);
            }
        }
        None
    }

    /// 已访问的URL集合
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }
}
