//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量处理器
//! - 管理应用生命周期（初始化、运行）
//! - 一次性解析起点坐标（失败即终止）
//! - 读取输入、写出结果、输出全局统计
//!
//! ### `dispatcher` - 调度器
//! - 固定数量的工作槽位，每个槽位独占一个 HTTP 客户端
//! - 完成一个条目立即开始下一个，结果按完成顺序发出
//!
//! ### `aggregator` - 汇总器
//! - 消费结果流，累积记录，转发进度事件
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<String>)
//!     ↓
//! dispatcher (N 个工作槽位)  →  aggregator
//!     ↓
//! workflow::ItemPipeline (处理单个代码)
//!     ↓
//! services (能力层：region / geocode / route)
//!     ↓
//! infrastructure (基础设施：ClientPool)
//! ```

pub mod aggregator;
pub mod batch_processor;
pub mod dispatcher;

// 重新导出主要类型
pub use aggregator::{Aggregator, BatchSummary, LogProgress, ProgressEvent, ProgressReporter};
pub use batch_processor::App;
pub use dispatcher::{Dispatcher, ResultStream};
