//! 任务上下文
//!
//! 封装"这是第几次生成、用哪个模型、哪张图片"这一信息，只用于日志

use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct SubmissionCtx {
    /// 会话内的任务编号（从1开始）
    pub attempt: u64,

    /// 模型 ID
    pub model_id: String,

    /// 图片描述
    pub image: String,
}

impl SubmissionCtx {
    pub fn new(attempt: u64, model_id: String, image: String) -> Self {
        Self {
            attempt,
            model_id,
            image,
        }
    }
}

impl Display for SubmissionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[任务#{} 模型#{} 图片#{}]",
            self.attempt, self.model_id, self.image
        )
    }
}
