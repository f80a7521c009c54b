use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 同时运行的条目流水线数量
    pub max_workers: usize,
    /// Google API 密钥（地理编码和路线服务共用）
    pub api_key: String,
    /// 固定起点地址
    pub origin_address: String,
    /// 地理编码查询时附加在 "城市, UF" 之后的国家名
    pub country: String,
    /// 输入文件（每行一个代码）
    pub input_file: String,
    /// 输入文件的表头名称（首行等于该值时跳过）
    pub input_column: String,
    /// 输出文件（JSON）
    pub output_file: String,
    // --- 外部服务 ---
    pub region_api_base_url: String,
    pub geocode_api_url: String,
    pub routes_api_url: String,
    // --- 超时（秒） ---
    pub region_timeout_secs: u64,
    pub geocode_timeout_secs: u64,
    pub route_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_workers: 20,
            api_key: String::new(),
            origin_address: "Açailândia, Maranhão, Brazil".to_string(),
            country: "Brazil".to_string(),
            input_file: "enderecos.txt".to_string(),
            input_column: "Domicilio Fiscal".to_string(),
            output_file: "resultados_rotas.json".to_string(),
            region_api_base_url: "https://servicodados.ibge.gov.br/api/v1/localidades/municipios"
                .to_string(),
            geocode_api_url: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
            routes_api_url: "https://routes.googleapis.com/directions/v2:computeRoutes".to_string(),
            region_timeout_secs: 10,
            geocode_timeout_secs: 10,
            route_timeout_secs: 15,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从默认值出发，用环境变量覆盖
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 读取 TOML 配置文件，缺省字段使用默认值
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `ROUTE_CONFIG` 指向的文件（如果有）+ 环境变量覆盖
    ///
    /// 只负责读取，校验在 `App::initialize` 中进行（此时日志已初始化）
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("ROUTE_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_workers == 0 {
            return Err(ConfigError::InvalidWorkers);
        }
        if self.api_key.is_empty() {
            warn!("⚠️ 未设置 GOOGLE_API_KEY，地理编码和路线请求很可能被拒绝");
        }
        Ok(())
    }

    pub fn region_timeout(&self) -> Duration {
        Duration::from_secs(self.region_timeout_secs)
    }

    pub fn geocode_timeout(&self) -> Duration {
        Duration::from_secs(self.geocode_timeout_secs)
    }

    pub fn route_timeout(&self) -> Duration {
        Duration::from_secs(self.route_timeout_secs)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            max_workers: env_parse("MAX_WORKERS").unwrap_or(self.max_workers),
            api_key: std::env::var("GOOGLE_API_KEY").unwrap_or(self.api_key),
            origin_address: std::env::var("ORIGIN_ADDRESS").unwrap_or(self.origin_address),
            country: std::env::var("COUNTRY").unwrap_or(self.country),
            input_file: std::env::var("INPUT_FILE").unwrap_or(self.input_file),
            input_column: std::env::var("INPUT_COLUMN").unwrap_or(self.input_column),
            output_file: std::env::var("OUTPUT_FILE").unwrap_or(self.output_file),
            region_api_base_url: std::env::var("REGION_API_BASE_URL")
                .unwrap_or(self.region_api_base_url),
            geocode_api_url: std::env::var("GEOCODE_API_URL").unwrap_or(self.geocode_api_url),
            routes_api_url: std::env::var("ROUTES_API_URL").unwrap_or(self.routes_api_url),
            region_timeout_secs: env_parse("REGION_TIMEOUT_SECS")
                .unwrap_or(self.region_timeout_secs),
            geocode_timeout_secs: env_parse("GEOCODE_TIMEOUT_SECS")
                .unwrap_or(self.geocode_timeout_secs),
            route_timeout_secs: env_parse("ROUTE_TIMEOUT_SECS").unwrap_or(self.route_timeout_secs),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
