//! 基础设施层
//!
//! 持有稀缺资源（HTTP 连接），只暴露能力

pub mod client_pool;

pub use client_pool::{ClientPool, WorkerContext};
