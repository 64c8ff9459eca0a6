use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 程序配置
///
/// API 密钥不在这里：它只来自用户输入，不从环境变量或文件读取
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 队列 API 地址
    pub queue_base_url: String,
    /// 模型 ID
    pub model_id: String,
    /// 生成帧数
    pub num_frames: u32,
    /// 推理步数
    pub num_inference_steps: u32,
    /// 轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 轮询时是否请求服务端日志
    pub request_logs: bool,
    /// 任务超时（秒），0 表示不限时
    pub timeout_secs: u64,
    /// data URI 是否使用图片的真实类型（默认一律标记为 JPEG）
    pub preserve_mime: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queue_base_url: "https://queue.fal.run".to_string(),
            model_id: "110602490-lcm-sd15-i2v".to_string(),
            num_frames: 50,
            num_inference_steps: 50,
            poll_interval_ms: 5000,
            request_logs: true,
            timeout_secs: 600,
            preserve_mime: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，缺失的字段使用默认值，环境变量优先
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))?;

        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(self) -> Self {
        Self {
            queue_base_url: std::env::var("FAL_QUEUE_BASE_URL").unwrap_or(self.queue_base_url),
            model_id: std::env::var("FAL_MODEL_ID").unwrap_or(self.model_id),
            num_frames: env_parse("NUM_FRAMES").unwrap_or(self.num_frames),
            num_inference_steps: env_parse("NUM_INFERENCE_STEPS").unwrap_or(self.num_inference_steps),
            poll_interval_ms: env_parse("POLL_INTERVAL_MS").unwrap_or(self.poll_interval_ms),
            request_logs: env_parse("REQUEST_LOGS").unwrap_or(self.request_logs),
            timeout_secs: env_parse("JOB_TIMEOUT_SECS").unwrap_or(self.timeout_secs),
            preserve_mime: env_parse("PRESERVE_MIME").unwrap_or(self.preserve_mime),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// 任务截止时间，`None` 表示一直等待
    pub fn deadline(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
