//! 地区代码解析服务 - 业务能力层
//!
//! 只负责"代码 → 地名"能力：`GET {base}/{code}`，读取 `nome` 与
//! `microrregiao.mesorregiao.UF.sigla`

use crate::error::StageError;
use crate::models::ResolvedAddress;
use crate::services::fetch_text;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const ENDPOINT: &str = "region";

#[derive(Debug, Deserialize)]
struct MunicipioResponse {
    nome: Option<String>,
    microrregiao: Option<Microrregiao>,
}

#[derive(Debug, Deserialize)]
struct Microrregiao {
    mesorregiao: Option<Mesorregiao>,
}

#[derive(Debug, Deserialize)]
struct Mesorregiao {
    #[serde(rename = "UF")]
    uf: Option<Uf>,
}

#[derive(Debug, Deserialize)]
struct Uf {
    sigla: Option<String>,
}

/// 地区代码解析服务
pub struct RegionResolver {
    base_url: String,
    timeout: Duration,
}

impl RegionResolver {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// 解析地区代码
    ///
    /// # 返回
    /// - `Ok(ResolvedAddress)`：`"Name, UF"`
    /// - `Err(NotFound)`：有响应但字段缺失或无法解析
    /// - `Err(Connection)`：请求失败，不重试
    pub async fn resolve(
        &self,
        client: &Client,
        region_code: &str,
    ) -> Result<ResolvedAddress, StageError> {
        let url = format!("{}/{}", self.base_url, region_code);
        debug!("查询地区代码: {}", url);

        let body = fetch_text(client.get(&url).timeout(self.timeout), ENDPOINT)
            .await
            .map_err(|e| {
                warn!("地区服务连接错误 ({}): {}", region_code, e);
                e
            })?;

        parse_municipio(&body)
            .ok_or_else(|| StageError::NotFound(format!("地区代码 {}", region_code)))
    }
}

fn parse_municipio(body: &str) -> Option<ResolvedAddress> {
    let response: MunicipioResponse = serde_json::from_str(body).ok()?;
    let name = response.nome.filter(|name| !name.trim().is_empty())?;
    let state = response
        .microrregiao?
        .mesorregiao?
        .uf?
        .sigla
        .filter(|sigla| !sigla.trim().is_empty())?;
    Some(ResolvedAddress::new(name, state))
}
