pub mod text_loader;

pub use text_loader::{load_codes, TextFileSource};

use crate::error::AppResult;
use async_trait::async_trait;

/// 输入来源：只负责提供原始代码列表
#[async_trait]
pub trait InputSource: Send + Sync {
    async fn load(&self) -> AppResult<Vec<String>>;
}

