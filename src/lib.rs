//! # Route Enrich
//!
//! 将一批地区代码批量解析为路线指标（距离、时长、过路费）
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP 连接），只暴露能力
//! - `ClientPool` - 每个工作槽位一个惰性创建、长期复用的客户端
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个条目
//! - `RegionResolver` - 地区代码 → "城市, UF"
//! - `Geocoder` - 地址 → 坐标
//! - `RouteEstimator` - 起点/终点 → 距离、时长、过路费
//! - `JsonFileSink` - 写出结果
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个代码"的完整处理流程
//! - `ItemPipeline` - 状态机（parse → region → geocode → route）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/dispatcher` - 固定并发的工作池，按完成顺序发出结果
//! - `orchestrator/aggregator` - 汇总结果并报告进度
//! - `orchestrator/batch_processor` - 应用入口，起点解析、输入输出、统计
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, StageError};
pub use infrastructure::{ClientPool, WorkerContext};
pub use models::{Coordinate, ResolvedAddress, RouteMetrics, RouteRecord, Status};
pub use orchestrator::{Aggregator, App, BatchSummary, Dispatcher};
pub use workflow::{ItemPipeline, ItemProcessor};
