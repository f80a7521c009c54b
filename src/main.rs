use anyhow::Result;
use route_enrich::utils::logging;
use route_enrich::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用（包含配置校验）
    App::initialize(config).await?.run().await?;

    Ok(())
}
