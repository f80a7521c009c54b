//! 错误类型
//!
//! 分为两层：
//! - `StageError`：单个条目在某个阶段的失败，只会被转换成带状态的记录，不会向上传播
//! - `AppError`：批量级别的致命错误（配置、起点地理编码、输入输出文件）

use std::path::PathBuf;
use thiserror::Error;

/// 阶段错误（CodeResolver / Geocoder / RouteEstimator 共用）
#[derive(Debug, Error)]
pub enum StageError {
    /// 服务有响应，但缺少预期字段或无法解析
    #[error("未找到: {0}")]
    NotFound(String),

    /// 请求本身失败（网络、超时、非 2xx 状态码）
    #[error("连接失败 ({endpoint}): {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// 路线服务没有返回可用路线，或返回的结构不完整
    #[error("没有可用路线: {0}")]
    NoRoute(String),
}

impl StageError {
    pub fn connection(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        StageError::Connection {
            endpoint: endpoint.into(),
            source,
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, StageError::Connection { .. })
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_workers 必须大于 0")]
    InvalidWorkers,

    #[error("无法读取配置文件 {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("无法解析配置文件 {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 应用程序错误类型（致命，终止整个批次）
#[derive(Debug, Error)]
pub enum AppError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 起点地址无法解析为坐标，任何条目都不会被处理
    #[error("无法获取起点坐标 ({address}): {source}")]
    OriginGeocode {
        address: String,
        #[source]
        source: StageError,
    },

    #[error("无法读取输入文件 {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("无法写入输出文件 {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("结果序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
