//! 条目处理流程 - 流程层
//!
//! 核心职责：定义"一个代码"的完整处理流程
//!
//! 状态顺序：
//! `Parsing → RegionLookup → Geocoding → RouteLookup → Done`
//!
//! 任一状态都可以直接进入终态 `Failed`，没有重试边。
//! 每次运行恰好产生一条记录，最多发出三次外部请求。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::infrastructure::WorkerContext;
use crate::models::{Coordinate, InputItem, ResolvedAddress, RouteMetrics, RouteRecord, Status};
use crate::services::StageServices;

/// 处理单个条目的能力，由调度器在工作槽位上调用
#[async_trait]
pub trait ItemProcessor: Send + Sync + 'static {
    async fn process(&self, ctx: &WorkerContext, input: String) -> RouteRecord;

    /// `process` 发生 panic 时代替它产生的记录
    ///
    /// 归入地区服务错误：此时没有任何已确认的部分字段
    fn panicked(&self, input: String) -> RouteRecord {
        RouteRecord::failed(input, Status::RegionLookupError, None, None)
    }
}

/// 终态失败，携带失败前已取得的字段
#[derive(Debug)]
struct Failure {
    status: Status,
    address: Option<ResolvedAddress>,
    destination: Option<Coordinate>,
}

impl Failure {
    fn new(status: Status) -> Self {
        Self {
            status,
            address: None,
            destination: None,
        }
    }

    fn with_address(mut self, address: ResolvedAddress) -> Self {
        self.address = Some(address);
        self
    }

    fn with_destination(mut self, destination: Coordinate) -> Self {
        self.destination = Some(destination);
        self
    }
}

#[derive(Debug)]
enum PipelineState {
    Parsing,
    RegionLookup {
        region_code: String,
    },
    Geocoding {
        address: ResolvedAddress,
    },
    RouteLookup {
        address: ResolvedAddress,
        destination: Coordinate,
    },
    Done {
        address: ResolvedAddress,
        destination: Coordinate,
        metrics: RouteMetrics,
    },
    Failed(Failure),
}

impl PipelineState {
    fn name(&self) -> &'static str {
        match self {
            PipelineState::Parsing => "Parsing",
            PipelineState::RegionLookup { .. } => "RegionLookup",
            PipelineState::Geocoding { .. } => "Geocoding",
            PipelineState::RouteLookup { .. } => "RouteLookup",
            PipelineState::Done { .. } => "Done",
            PipelineState::Failed(_) => "Failed",
        }
    }
}

/// 条目处理流水线
///
/// - 不持有 HTTP 客户端，通过 `WorkerContext` 使用所在槽位的客户端
/// - 起点坐标在调度前解析一次，之后只读
pub struct ItemPipeline {
    services: Arc<StageServices>,
    origin: Coordinate,
}

impl ItemPipeline {
    pub fn new(services: Arc<StageServices>, origin: Coordinate) -> Self {
        Self { services, origin }
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub async fn run(&self, ctx: &WorkerContext, input: String) -> RouteRecord {
        let mut state = PipelineState::Parsing;

        loop {
            debug!("[{}] 槽位 {} 状态: {}", input, ctx.slot(), state.name());

            state = match state {
                PipelineState::Parsing => Self::parse(&input),
                PipelineState::RegionLookup { region_code } => {
                    self.lookup_region(ctx, &region_code).await
                }
                PipelineState::Geocoding { address } => self.geocode(ctx, address).await,
                PipelineState::RouteLookup {
                    address,
                    destination,
                } => self.lookup_route(ctx, address, destination).await,
                PipelineState::Done {
                    address,
                    destination,
                    metrics,
                } => {
                    info!(
                        "[{}] ✓ {}: {} km, {}",
                        input, address, metrics.distance_km, metrics.duration
                    );
                    return RouteRecord::success(input, address, destination, metrics);
                }
                PipelineState::Failed(failure) => {
                    warn!("[{}] ⚠️ {}", input, failure.status);
                    return RouteRecord::failed(
                        input,
                        failure.status,
                        failure.address,
                        failure.destination,
                    );
                }
            };
        }
    }

    fn parse(input: &str) -> PipelineState {
        match InputItem::parse(input) {
            Ok(item) => PipelineState::RegionLookup {
                region_code: item.region_code().to_string(),
            },
            Err(e) => {
                debug!("[{}] {}", input, e);
                PipelineState::Failed(Failure::new(Status::InvalidFormat))
            }
        }
    }

    async fn lookup_region(&self, ctx: &WorkerContext, region_code: &str) -> PipelineState {
        let client = match ctx.client().await {
            Ok(client) => client,
            Err(e) => {
                warn!("槽位 {} 无法获取 HTTP 客户端: {}", ctx.slot(), e);
                return PipelineState::Failed(Failure::new(Status::RegionLookupError));
            }
        };

        match self.services.resolver.resolve(client, region_code).await {
            Ok(address) => PipelineState::Geocoding { address },
            Err(e) if e.is_connection() => {
                PipelineState::Failed(Failure::new(Status::RegionLookupError))
            }
            Err(e) => {
                debug!("{}", e);
                PipelineState::Failed(Failure::new(Status::RegionNotFound))
            }
        }
    }

    async fn geocode(&self, ctx: &WorkerContext, address: ResolvedAddress) -> PipelineState {
        let query = address.geocode_query(&self.services.country);
        let located = match ctx.client().await {
            Ok(client) => self.services.geocoder.locate(client, &query).await,
            Err(e) => Err(e),
        };

        match located {
            Ok(destination) => PipelineState::RouteLookup {
                address,
                destination,
            },
            Err(e) => {
                debug!("{}", e);
                PipelineState::Failed(Failure::new(Status::GeocodeError).with_address(address))
            }
        }
    }

    async fn lookup_route(
        &self,
        ctx: &WorkerContext,
        address: ResolvedAddress,
        destination: Coordinate,
    ) -> PipelineState {
        let estimated = match ctx.client().await {
            Ok(client) => {
                self.services
                    .estimator
                    .estimate(client, self.origin, destination)
                    .await
            }
            Err(e) => Err(e),
        };

        match estimated {
            Ok(metrics) => PipelineState::Done {
                address,
                destination,
                metrics,
            },
            Err(e) => {
                let status = if e.is_connection() {
                    Status::RouteLookupError
                } else {
                    debug!("{}", e);
                    Status::NoRouteFound
                };
                PipelineState::Failed(
                    Failure::new(status)
                        .with_address(address)
                        .with_destination(destination),
                )
            }
        }
    }
}

#[async_trait]
impl ItemProcessor for ItemPipeline {
    async fn process(&self, ctx: &WorkerContext, input: String) -> RouteRecord {
        self.run(ctx, input).await
    }
}
