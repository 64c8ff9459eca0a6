use std::time::Duration;

use crate::models::UiStatus;

/// 一次生成尝试的错误
///
/// `Display` 输出即为展示给用户的提示信息
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// 未选择图片
    #[error("请先上传图片")]
    MissingImage,

    /// API 密钥为空
    #[error("请输入 FAL.AI API 密钥")]
    MissingCredential,

    /// 读取图片失败
    #[error("生成视频时出错：无法读取图片 ({path}): {source}")]
    EncodingFailed {
        path: String,
        source: std::io::Error,
    },

    /// 网络或客户端错误
    #[error("生成视频时出错：{0}")]
    TransportError(String),

    /// 任务完成但结果中没有视频
    #[error("生成视频时出错：视频生成失败")]
    GenerationFailed,

    /// 超过截止时间
    #[error("生成视频时出错：任务超时 ({}秒)", .0.as_secs())]
    Timeout(Duration),

    /// 用户取消
    #[error("生成视频时出错：任务已取消")]
    Cancelled,

    /// 已有任务在进行中
    #[error("已有任务正在生成中")]
    Busy,
}

impl SubmitError {
    /// 出错后界面进入的状态
    ///
    /// `Busy` 不改变当前状态，返回 `None`
    pub fn status(&self) -> Option<UiStatus> {
        match self {
            SubmitError::MissingImage => Some(UiStatus::AwaitingImageError),
            SubmitError::MissingCredential => Some(UiStatus::AwaitingCredentialError),
            SubmitError::Busy => None,
            _ => Some(UiStatus::Failed),
        }
    }
}

impl From<ClientError> for SubmitError {
    fn from(err: ClientError) -> Self {
        SubmitError::TransportError(err.to_string())
    }
}

/// 队列 API 客户端错误
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// 网络请求失败
    #[error("请求失败: {0}")]
    Request(#[from] reqwest::Error),

    /// 服务端返回非 2xx 状态码
    #[error("API返回错误响应 ({status}): {body}")]
    Api { status: u16, body: String },

    /// JSON 解析失败
    #[error("JSON解析失败: {0}")]
    Decode(#[from] serde_json::Error),

    /// 服务端报告任务失败
    #[error("任务失败: {0}")]
    JobFailed(String),
}
