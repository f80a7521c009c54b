//! HTTP 客户端池 - 基础设施层
//!
//! 每个工作槽位持有一个长期存活的 `reqwest::Client`，在该槽位第一次发起请求时才创建，
//! 之后该槽位处理的所有条目、所有阶段都复用它，从而复用 TCP/TLS 连接。
//!
//! 槽位与工作任务一一对应，同一个客户端不会被两个槽位同时使用。

use crate::error::StageError;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// 按槽位索引的客户端池
pub struct ClientPool {
    slots: Vec<OnceCell<Client>>,
}

impl ClientPool {
    pub fn new(size: usize) -> Self {
        Self {
            slots: (0..size.max(1)).map(|_| OnceCell::new()).collect(),
        }
    }

    /// 槽位数量
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// 获取槽位对应的客户端，首次调用时创建
    pub async fn acquire(&self, slot: usize) -> Result<&Client, StageError> {
        let cell = self.slots.get(slot).ok_or_else(|| {
            StageError::NotFound(format!("槽位 {} 超出范围 [0, {})", slot, self.slots.len()))
        })?;

        cell.get_or_try_init(move || async move {
            debug!("为槽位 {} 创建 HTTP 客户端", slot);
            Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .map_err(|e| StageError::connection("client-pool", e))
        })
        .await
    }

    /// 已创建的客户端数量
    pub fn created(&self) -> usize {
        self.slots.iter().filter(|cell| cell.initialized()).count()
    }
}

/// 单个工作槽位的上下文
///
/// 生命周期与工作池相同，不可复制，也不在槽位之间共享
pub struct WorkerContext {
    slot: usize,
    pool: Arc<ClientPool>,
}

impl WorkerContext {
    pub fn new(slot: usize, pool: Arc<ClientPool>) -> Self {
        Self { slot, pool }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// 本槽位的客户端（惰性创建）
    pub async fn client(&self) -> Result<&Client, StageError> {
        self.pool.acquire(self.slot).await
    }
}
