use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// 一次任务请求的输入参数
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRequest {
    /// 图片 data URI
    pub image_url: String,
    pub num_frames: u32,
    pub num_inference_steps: u32,
}

/// 生成成功的视频地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUrl(pub String);

impl VideoUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 提交到队列后返回的任务信息
#[derive(Debug, Clone, Deserialize)]
pub struct QueueSubmitResponse {
    pub request_id: String,
    pub status_url: String,
    pub response_url: String,
}

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    InQueue,
    InProgress,
    Completed,
}

/// 状态轮询结果
#[derive(Debug, Clone, Deserialize)]
pub struct QueueStatus {
    pub status: JobState,
    #[serde(default)]
    pub queue_position: Option<u64>,
    #[serde(default)]
    pub logs: Option<Vec<QueueLog>>,
    /// 任务失败时服务端给出的原因
    #[serde(default)]
    pub error: Option<String>,
}

/// 服务端日志
#[derive(Debug, Clone, Deserialize)]
pub struct QueueLog {
    pub message: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// 从结果中提取视频地址
///
/// `video` 字段可以是字符串，也可以是带 `url` 的对象
pub fn extract_video_url(payload: &Value) -> Option<VideoUrl> {
    let video = payload.get("video")?;
    let url = match video {
        Value::String(s) => s.as_str(),
        Value::Object(obj) => obj.get("url")?.as_str()?,
        _ => return None,
    };

    if url.trim().is_empty() {
        None
    } else {
        Some(VideoUrl(url.to_string()))
    }
}
