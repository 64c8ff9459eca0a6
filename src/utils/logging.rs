/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::workflow::SessionView;

/// 初始化日志
///
/// `RUST_LOG` 优先，否则默认 info，详细模式为 debug。日志写到 stderr，重复调用无副作用
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 图片转视频生成器启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🤖 模型: {}", config.model_id);
    info!(
        "🎞️ 帧数: {} | 推理步数: {} | 轮询间隔: {}ms",
        config.num_frames, config.num_inference_steps, config.poll_interval_ms
    );
    match config.deadline() {
        Some(limit) => info!("⏱️ 超时: {} 秒", limit.as_secs()),
        None => info!("⏱️ 超时: 不限"),
    }
    info!("{}", "=".repeat(60));
}

/// 打印最终结果
pub fn log_outcome(view: &SessionView) {
    info!("\n{}", "=".repeat(60));
    info!(
        "📊 生成结束 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("状态: {}", view.status);
    if let Some(url) = &view.video_url {
        info!("✅ 视频: {}", url);
    }
    if let Some(msg) = &view.error_message {
        info!("❌ {}", msg);
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
