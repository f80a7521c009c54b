//! 批量路线处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **起点解析**：调度前只解析一次起点坐标，失败则直接终止
//! 2. **批量加载**：从输入来源读取全部代码（`Vec<String>`）
//! 3. **并发控制**：交给 `Dispatcher`，固定数量的工作槽位
//! 4. **结果汇总**：`Aggregator` 按完成顺序收集记录并报告进度
//! 5. **资源管理**：持有 `ClientPool`，生命周期与应用相同
//! 6. **全局统计**：按状态汇总并写出结果

use crate::config::Config;
use crate::error::{AppError, AppResult, StageError};
use crate::infrastructure::{ClientPool, WorkerContext};
use crate::models::{Coordinate, InputSource, RouteRecord, TextFileSource};
use crate::orchestrator::{Aggregator, BatchSummary, Dispatcher, LogProgress};
use crate::services::{JsonFileSink, OutputSink, StageServices};
use crate::utils::logging::{log_codes_loaded, log_startup, print_final_stats};
use crate::workflow::ItemPipeline;
use std::sync::Arc;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    pool: Arc<ClientPool>,
    pipeline: Arc<ItemPipeline>,
}

impl App {
    /// 初始化应用
    ///
    /// 起点地址无法地理编码时返回 `AppError::OriginGeocode`，不会处理任何条目
    pub async fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;
        log_startup(&config);

        let pool = Arc::new(ClientPool::new(config.max_workers));
        let services = Arc::new(StageServices::new(&config));

        info!("\n[1/4] 正在获取起点坐标...");
        let origin = resolve_origin(&config, &services, &pool).await?;
        info!("-> 起点坐标: {}", origin);

        Ok(Self {
            config,
            pool,
            pipeline: Arc::new(ItemPipeline::new(services, origin)),
        })
    }

    pub fn origin(&self) -> Coordinate {
        self.pipeline.origin()
    }

    /// 运行应用主逻辑（使用配置中的输入输出文件）
    pub async fn run(&self) -> AppResult<BatchSummary> {
        let source = TextFileSource::from_config(&self.config);
        let sink = JsonFileSink::new(&self.config.output_file);
        self.run_with(&source, &sink).await
    }

    /// 从 `source` 读取代码，处理后写入 `sink`
    pub async fn run_with(
        &self,
        source: &dyn InputSource,
        sink: &dyn OutputSink,
    ) -> AppResult<BatchSummary> {
        info!("\n[2/4] 正在读取输入...");
        let codes = source.load().await?;

        if codes.is_empty() {
            warn!("⚠️ 没有找到待处理的代码，程序结束");
            return Ok(BatchSummary::default());
        }
        log_codes_loaded(codes.len(), self.config.max_workers);

        info!("\n[3/4] 正在并行计算路线...");
        let records = self.process(codes).await;
        let summary = BatchSummary::from_records(&records);

        if records.is_empty() {
            warn!("⚠️ 没有处理任何条目");
        } else {
            info!("\n[4/4] 正在保存结果...");
            sink.write(&records).await?;
        }

        print_final_stats(&summary, &self.config.output_file);
        Ok(summary)
    }

    /// 调度全部代码并收集记录（完成顺序）
    pub async fn process(&self, codes: Vec<String>) -> Vec<RouteRecord> {
        let dispatcher = Dispatcher::new(self.pipeline.clone(), self.pool.clone());
        let stream = dispatcher.run(codes, self.config.max_workers);
        let total = stream.total();

        Aggregator::new()
            .with_reporter(LogProgress)
            .collect(stream, total)
            .await
    }
}

/// 解析起点坐标
///
/// 借用槽位 0 的客户端；此时调度尚未开始，不存在并发使用
async fn resolve_origin(
    config: &Config,
    services: &StageServices,
    pool: &Arc<ClientPool>,
) -> AppResult<Coordinate> {
    let fatal = |source: StageError| AppError::OriginGeocode {
        address: config.origin_address.clone(),
        source,
    };

    let ctx = WorkerContext::new(0, pool.clone());
    let client = ctx.client().await.map_err(fatal)?;

    services
        .geocoder
        .locate(client, &config.origin_address)
        .await
        .map_err(fatal)
}
