//! 会话状态
//!
//! 一个会话只保存一份界面状态，只由提交流程修改

use crate::error::SubmitError;
use crate::models::{UiStatus, VideoUrl};

/// 界面状态快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub status: UiStatus,
    /// 展示给用户的错误信息
    pub error_message: Option<String>,
    /// 最近一次成功生成的视频
    pub video_url: Option<VideoUrl>,
    /// 是否有任务正在进行
    pub busy: bool,
    /// 已发起的任务数
    pub attempts: u64,
}

#[derive(Debug, Default)]
pub(crate) struct SessionState {
    view: SessionView,
}

impl SessionState {
    pub(crate) fn view(&self) -> SessionView {
        self.view.clone()
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.view.busy
    }

    /// 前置检查失败，不发起任务
    pub(crate) fn reject(&mut self, err: &SubmitError) {
        if let Some(status) = err.status() {
            self.view.status = status;
            self.view.error_message = Some(err.to_string());
        }
    }

    /// 进入生成中状态，清除之前的错误和结果，返回本次任务编号
    pub(crate) fn begin(&mut self) -> u64 {
        self.view.busy = true;
        self.view.status = UiStatus::Submitting;
        self.view.error_message = None;
        self.view.video_url = None;
        self.view.attempts += 1;
        self.view.attempts
    }

    pub(crate) fn succeed(&mut self, url: &VideoUrl) {
        self.view.status = UiStatus::Succeeded;
        self.view.error_message = None;
        self.view.video_url = Some(url.clone());
    }

    pub(crate) fn fail(&mut self, err: &SubmitError) {
        self.view.status = UiStatus::Failed;
        self.view.error_message = Some(err.to_string());
        self.view.video_url = None;
    }

    /// 释放忙碌标记
    ///
    /// 任务在未结束时被丢弃，按取消处理
    pub(crate) fn finish(&mut self) {
        self.view.busy = false;
        if self.view.status.is_submitting() {
            self.fail(&SubmitError::Cancelled);
        }
    }

    /// 清除错误信息，失败类状态一并回到空闲
    pub(crate) fn clear_error(&mut self) {
        self.view.error_message = None;
        if matches!(
            self.view.status,
            UiStatus::AwaitingImageError | UiStatus::AwaitingCredentialError | UiStatus::Failed
        ) {
            self.view.status = UiStatus::Idle;
        }
    }

    pub(crate) fn clear_credential_error(&mut self) {
        if self.view.status == UiStatus::AwaitingCredentialError {
            self.clear_error();
        }
    }
}
