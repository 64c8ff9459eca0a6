//! 命令行入口
//!
//! 负责解析参数、组装客户端和会话、接管 Ctrl-C，并输出结果

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::clients::FalQueueClient;
use crate::config::Config;
use crate::models::{SourceImage, VideoUrl};
use crate::services::download_video;
use crate::utils::logging::{log_outcome, log_startup};
use crate::workflow::Session;

/// 图片转视频生成器
#[derive(Debug, Parser)]
#[command(name = "image_to_video", version, about = "上传图片，调用 fal.ai 生成视频")]
pub struct Cli {
    /// FAL.AI API 密钥，不提供时从标准输入读取
    #[arg(long)]
    pub api_key: Option<String>,

    /// 输入图片
    #[arg(long, short)]
    pub image: Option<PathBuf>,

    /// TOML 配置文件
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 把生成的视频保存到此路径
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// 任务超时（秒），0 表示不限时
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// 轮询间隔（毫秒）
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// 显示详细日志
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// 合并配置文件、环境变量和命令行参数
    pub async fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path).await?,
            None => Config::from_env(),
        };

        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
        if let Some(ms) = self.poll_interval_ms {
            config.poll_interval_ms = ms;
        }
        config.verbose_logging |= self.verbose;

        Ok(config)
    }
}

/// 应用主结构
pub struct App {
    http: reqwest::Client,
    session: Session<FalQueueClient>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    /// 使用指定的 HTTP 客户端初始化
    pub fn with_http(http: reqwest::Client, config: Config) -> Self {
        log_startup(&config);

        let client = FalQueueClient::with_client(http.clone(), &config);

        Self {
            http,
            session: Session::new(client, config),
        }
    }

    /// 运行一次生成
    ///
    /// 成功后先把视频地址写入 `out`，再按需下载，下载失败不影响地址输出
    pub async fn run(&mut self, cli: Cli, out: &mut impl Write) -> Result<VideoUrl> {
        if let Some(path) = cli.image {
            self.session.select_image(SourceImage::from_path(path));
        }

        let credential = match cli.api_key {
            Some(key) => key,
            None => prompt_credential().await?,
        };
        self.session.set_credential(credential);

        let cancel = CancellationToken::new();
        let ctrl_c = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("收到 Ctrl-C，正在取消任务...");
                ctrl_c.cancel();
            }
        });

        let result = self.session.generate(&cancel).await;
        cancel.cancel();
        log_outcome(&self.session.view());

        let url = result?;
        writeln!(out, "{}", url).context("无法输出视频地址")?;

        if let Some(dest) = cli.output {
            let bytes = download_video(&self.http, &url, &dest).await?;
            info!("💾 视频已保存至: {} ({} 字节)", dest.display(), bytes);
        }

        Ok(url)
    }
}

/// 从标准输入读取 API 密钥
async fn prompt_credential() -> Result<String> {
    eprint!("请输入您的 FAL.AI API 密钥: ");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let line = lines
        .next_line()
        .await
        .context("读取 API 密钥失败")?
        .unwrap_or_default();

    Ok(line)
}
