//! 调度器 - 编排层
//!
//! ## 职责
//!
//! 1. **固定工作池**：启动 N 个工作任务，每个任务独占一个槽位（及其 HTTP 客户端）
//! 2. **持续喂入**：工作任务从共享队列取下一个条目，完成一个立即开始下一个，
//!    始终保持并发上限
//! 3. **完成即发出**：每条记录处理完立刻通过完成通道发出，顺序与输入无关
//!
//! 没有取消机制：某个条目失败不会影响其它条目。
//! 条目处理中的 panic 在槽位内捕获，仍然产生一条失败记录，槽位继续工作。

use crate::infrastructure::{ClientPool, WorkerContext};
use crate::models::RouteRecord;
use crate::workflow::ItemProcessor;
use futures::future::join_all;
use futures::{FutureExt, Stream};
use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

type WorkQueue = Arc<Mutex<VecDeque<String>>>;

/// 调度器
pub struct Dispatcher<P: ItemProcessor> {
    processor: Arc<P>,
    pool: Arc<ClientPool>,
}

impl<P: ItemProcessor> Dispatcher<P> {
    pub fn new(processor: Arc<P>, pool: Arc<ClientPool>) -> Self {
        Self { processor, pool }
    }

    /// 以 `concurrency` 个工作槽位处理全部条目
    ///
    /// 并发数会被限制在 `[1, 池大小]`，且不超过条目数。
    /// 返回的流在所有条目处理完后关闭。
    pub fn run(&self, items: Vec<String>, concurrency: usize) -> ResultStream {
        let total = items.len();

        if concurrency > self.pool.size() {
            warn!(
                "⚠️ 并发数 {} 超过客户端池大小 {}，按 {} 处理",
                concurrency,
                self.pool.size(),
                self.pool.size()
            );
        }
        let workers = concurrency.clamp(1, self.pool.size()).min(total.max(1));
        debug!("启动 {} 个工作槽位，共 {} 个条目", workers, total);

        let queue: WorkQueue = Arc::new(Mutex::new(VecDeque::from(items)));
        let (tx, rx) = mpsc::unbounded_channel();

        let handles: Vec<JoinHandle<usize>> = (0..workers)
            .map(|slot| {
                let ctx = WorkerContext::new(slot, self.pool.clone());
                tokio::spawn(worker_loop(
                    ctx,
                    self.processor.clone(),
                    queue.clone(),
                    tx.clone(),
                ))
            })
            .collect();

        // 所有发送端都在工作任务里，任务全部结束后接收端自然关闭
        drop(tx);

        let supervisor = tokio::spawn(async move {
            for (slot, joined) in join_all(handles).await.into_iter().enumerate() {
                match joined {
                    Ok(processed) => debug!("槽位 {} 退出，共处理 {} 个条目", slot, processed),
                    Err(e) => error!("槽位 {} 任务执行失败: {}", slot, e),
                }
            }
        });

        ResultStream {
            rx,
            total,
            _supervisor: supervisor,
        }
    }
}

async fn worker_loop<P: ItemProcessor>(
    ctx: WorkerContext,
    processor: Arc<P>,
    queue: WorkQueue,
    tx: mpsc::UnboundedSender<RouteRecord>,
) -> usize {
    let mut processed = 0;

    loop {
        let next = queue.lock().await.pop_front();
        let Some(input) = next else {
            break;
        };

        let fallback = input.clone();
        let record = match AssertUnwindSafe(processor.process(&ctx, input))
            .catch_unwind()
            .await
        {
            Ok(record) => record,
            Err(_) => {
                error!("槽位 {}: 处理 {} 时发生 panic", ctx.slot(), fallback);
                processor.panicked(fallback)
            }
        };
        processed += 1;

        if tx.send(record).is_err() {
            warn!("槽位 {}: 结果接收端已关闭，停止处理", ctx.slot());
            break;
        }
    }

    processed
}

/// 完成通道上的记录流
pub struct ResultStream {
    rx: mpsc::UnboundedReceiver<RouteRecord>,
    total: usize,
    _supervisor: JoinHandle<()>,
}

impl ResultStream {
    /// 提交的条目总数
    pub fn total(&self) -> usize {
        self.total
    }

    pub async fn recv(&mut self) -> Option<RouteRecord> {
        self.rx.recv().await
    }
}

impl Stream for ResultStream {
    type Item = RouteRecord;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
