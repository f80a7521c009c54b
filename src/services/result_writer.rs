//! 结果写入服务 - 业务能力层
//!
//! 只负责把最终的记录集合持久化，不关心记录如何产生

use crate::error::{AppError, AppResult};
use crate::models::RouteRecord;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// 输出目标
#[async_trait]
pub trait OutputSink: Send + Sync {
    async fn write(&self, records: &[RouteRecord]) -> AppResult<()>;
}

/// 以 JSON 数组写入文件
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl OutputSink for JsonFileSink {
    async fn write(&self, records: &[RouteRecord]) -> AppResult<()> {
        debug!("写入 {} 条记录到 {}", records.len(), self.path.display());

        let content = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, content)
            .await
            .map_err(|source| AppError::Output {
                path: self.path.clone(),
                source,
            })
    }
}
