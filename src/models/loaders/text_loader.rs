use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::loaders::InputSource;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 文本文件输入：每行一个代码
pub struct TextFileSource {
    path: PathBuf,
    header: Option<String>,
}

impl TextFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            header: None,
        }
    }

    /// 首行等于 `header` 时跳过
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.input_file).with_header(config.input_column.clone())
    }
}

#[async_trait]
impl InputSource for TextFileSource {
    async fn load(&self) -> AppResult<Vec<String>> {
        load_codes(&self.path, self.header.as_deref()).await
    }
}

/// 从文本文件加载代码列表
///
/// 去掉首尾空白，丢弃空行
pub async fn load_codes(path: &Path, header: Option<&str>) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| AppError::Input {
            path: path.to_path_buf(),
            source,
        })?;

    let mut lines = content
        .lines()
        .map(|line| line.trim_start_matches('\u{feff}').trim())
        .filter(|line| !line.is_empty())
        .peekable();

    let has_header = match (header, lines.peek()) {
        (Some(header), Some(first)) => *first == header.trim(),
        _ => false,
    };
    if has_header {
        lines.next();
    }

    let codes: Vec<String> = lines.map(str::to_string).collect();
    tracing::info!(
        "成功加载 {} 个代码: {}",
        codes.len(),
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    Ok(codes)
}
