//! 结果汇总
//!
//! 消费调度器的结果流直到关闭，累积全部记录，并可选地把每次完成事件转发给进度报告器。

use crate::models::{RouteRecord, Status};
use futures::{Stream, StreamExt};
use std::collections::BTreeMap;
use tracing::info;

/// 单条记录完成事件
#[derive(Debug, Clone, Copy)]
pub struct ProgressEvent<'a> {
    pub input: &'a str,
    pub status: Status,
    pub completed: usize,
    pub total: usize,
}

/// 进度报告器（可选，不影响结果正确性）
pub trait ProgressReporter: Send + Sync {
    fn on_complete(&self, event: &ProgressEvent<'_>);
}

/// 通过日志输出进度
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn on_complete(&self, event: &ProgressEvent<'_>) {
        info!(
            "[{}/{}] 已处理: {} ({})",
            event.completed, event.total, event.input, event.status
        );
    }
}

/// 汇总器
#[derive(Default)]
pub struct Aggregator {
    reporter: Option<Box<dyn ProgressReporter>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reporter(mut self, reporter: impl ProgressReporter + 'static) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    /// 收集流中的全部记录，顺序为完成顺序
    pub async fn collect<S>(&self, mut stream: S, total: usize) -> Vec<RouteRecord>
    where
        S: Stream<Item = RouteRecord> + Unpin,
    {
        let mut records = Vec::with_capacity(total);

        while let Some(record) = stream.next().await {
            records.push(record);

            if let (Some(reporter), Some(record)) = (&self.reporter, records.last()) {
                reporter.on_complete(&ProgressEvent {
                    input: record.input(),
                    status: record.status(),
                    completed: records.len(),
                    total,
                });
            }
        }

        records
    }
}

/// 按状态统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub by_status: BTreeMap<Status, usize>,
}

impl BatchSummary {
    pub fn from_records(records: &[RouteRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Default::default()
        };
        for record in records {
            *summary.by_status.entry(record.status()).or_default() += 1;
        }
        summary
    }

    pub fn count(&self, status: Status) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn success(&self) -> usize {
        self.count(Status::Success)
    }

    pub fn failed(&self) -> usize {
        self.total - self.success()
    }
}
