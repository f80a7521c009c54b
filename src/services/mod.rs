//! 业务能力层
//!
//! 每个服务只描述"我能做什么"，一次只处理一个条目，不关心流程顺序，
//! 也不持有 HTTP 客户端（由调用方按槽位传入）。

pub mod geocoder;
pub mod region_resolver;
pub mod result_writer;
pub mod route_estimator;

pub use geocoder::Geocoder;
pub use region_resolver::RegionResolver;
pub use result_writer::{JsonFileSink, OutputSink};
pub use route_estimator::RouteEstimator;

use crate::config::Config;
use crate::error::StageError;
use reqwest::RequestBuilder;

/// 三个阶段服务的集合，所有流水线只读共享
pub struct StageServices {
    pub resolver: RegionResolver,
    pub geocoder: Geocoder,
    pub estimator: RouteEstimator,
    /// 目的地地理编码时附加的国家名
    pub country: String,
}

impl StageServices {
    pub fn new(config: &Config) -> Self {
        Self {
            resolver: RegionResolver::new(&config.region_api_base_url, config.region_timeout()),
            geocoder: Geocoder::new(
                &config.geocode_api_url,
                &config.api_key,
                config.geocode_timeout(),
            ),
            estimator: RouteEstimator::new(
                &config.routes_api_url,
                &config.api_key,
                config.route_timeout(),
            ),
            country: config.country.clone(),
        }
    }
}

/// 发送请求并读取响应体
///
/// 网络错误、超时和非 2xx 状态码都归为 `Connection`
async fn fetch_text(request: RequestBuilder, endpoint: &str) -> Result<String, StageError> {
    let response = request
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| StageError::connection(endpoint, e))?;

    response
        .text()
        .await
        .map_err(|e| StageError::connection(endpoint, e))
}
