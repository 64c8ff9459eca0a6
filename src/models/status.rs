use std::fmt;

/// 界面状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiStatus {
    #[default]
    Idle,
    /// 缺少 API 密钥
    AwaitingCredentialError,
    /// 缺少图片
    AwaitingImageError,
    /// 生成中
    Submitting,
    Succeeded,
    Failed,
}

impl UiStatus {
    pub fn is_submitting(self) -> bool {
        self == UiStatus::Submitting
    }
}

impl fmt::Display for UiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UiStatus::Idle => "空闲",
            UiStatus::AwaitingCredentialError => "缺少密钥",
            UiStatus::AwaitingImageError => "缺少图片",
            UiStatus::Submitting => "生成中",
            UiStatus::Succeeded => "成功",
            UiStatus::Failed => "失败",
        };
        f.write_str(label)
    }
}
