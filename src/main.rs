use anyhow::Result;
use clap::Parser;
use image_to_video::utils::logging;
use image_to_video::{App, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    logging::init(cli.verbose);

    // 加载配置
    let config = cli.resolve_config().await?;

    // 初始化并运行应用，视频地址输出到 stdout
    let mut app = App::initialize(config);
    app.run(cli, &mut std::io::stdout()).await?;

    Ok(())
}
