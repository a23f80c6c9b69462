// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 知识库错误类型
#[derive(Error, Debug)]
pub enum KnowledgeError {
    /// 请求未能送达
    #[error("Knowledge API request failed: {0}")]
    Request(String),
    /// 服务端拒绝
    #[error("Knowledge API rejected upload with status {status}: {body}")]
    Rejected { status: u16, body: String },
    /// 响应无法解析
    #[error("Invalid knowledge API response: {0}")]
    InvalidResponse(String),
}

/// 知识文件注册特质
///
/// 将爬取输出登记到外部检索索引，供助手检索使用
#[async_trait]
pub trait KnowledgeRegistry: Send + Sync {
    /// 上传知识文件
    ///
    /// # 参数
    ///
    /// * `api_key` - 团队自己的 API 密钥
    /// * `file_name` - 文件名
    /// * `data` - 文件内容
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 外部系统分配的文件ID
    /// * `Err(KnowledgeError)` - 上传失败
    async fn upload_file(
        &self,
        api_key: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<String, KnowledgeError>;
}
