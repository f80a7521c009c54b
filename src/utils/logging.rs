/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use crate::config::Config;
use crate::models::Status;
use crate::orchestrator::BatchSummary;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则默认 `info`（`verbose` 时为 `debug`）。重复调用无副作用。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 路线计算模式");
    info!("📍 起点: {}", config.origin_address);
    info!("📊 最大并发数: {}", config.max_workers);
    info!("{}", "=".repeat(60));
}

/// 记录代码加载信息
///
/// # 参数
/// - `total`: 代码总数
/// - `max_workers`: 最大并发数
pub fn log_codes_loaded(total: usize, max_workers: usize) {
    info!("✓ 找到 {} 个待处理的代码", total);
    info!("📋 以 {} 个工作槽位并行处理", max_workers.min(total));
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &BatchSummary, output_file: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", summary.success(), summary.total);
    info!("❌ 失败: {}", summary.failed());
    for status in Status::ALL.iter().filter(|s| !s.is_success()) {
        let count = summary.count(*status);
        if count > 0 {
            info!("   - {}: {}", status, count);
        }
    }
    info!("{}", "=".repeat(60));
    if summary.total > 0 {
        info!("\n结果已保存至: {}", output_file);
    }
}
