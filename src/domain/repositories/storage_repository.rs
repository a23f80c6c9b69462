// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 配置错误
    #[error("Storage misconfigured: {0}")]
    Config(String),
    /// 存储错误
    #[error("Storage error: {0}")]
    Other(String),
}

/// 存储仓库特质
///
/// 定义 blob 存储接口，写入后返回可公开访问的URL
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// 使用指定键保存数据，返回公开URL
    async fn put(&self, key: &str, data: &[u8], content_type: &str)
        -> Result<String, StorageError>;

    /// 根据键从存储中检索数据
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
}
