//! 会话 - 对应一个页面
//!
//! 持有用户输入（API 密钥、图片）和提交流程，一次只允许一个任务

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::clients::VideoJobApi;
use crate::config::Config;
use crate::error::SubmitError;
use crate::models::{SourceImage, VideoUrl};
use crate::workflow::state::SessionView;
use crate::workflow::submission::SubmissionWorkflow;

pub struct Session<C> {
    workflow: SubmissionWorkflow<C>,
    credential: String,
    image: Option<SourceImage>,
}

impl<C: VideoJobApi> Session<C> {
    pub fn new(client: C, config: Config) -> Self {
        Self {
            workflow: SubmissionWorkflow::new(client, config),
            credential: String::new(),
            image: None,
        }
    }

    /// 更新 API 密钥，清除密钥相关的错误
    pub fn set_credential(&mut self, raw: impl Into<String>) {
        self.credential = raw.into();
        self.workflow.clear_credential_error();
    }

    /// 选择图片，替换之前的图片并清除错误信息
    pub fn select_image(&mut self, image: SourceImage) {
        debug!("选择图片: {}", image.describe());
        self.image = Some(image);
        self.workflow.clear_error();
    }

    /// 提交按钮是否可用
    pub fn can_submit(&self) -> bool {
        !self.workflow.is_busy() && self.image.is_some()
    }

    /// 生成视频
    pub async fn generate(&self, cancel: &CancellationToken) -> Result<VideoUrl, SubmitError> {
        self.workflow
            .submit(&self.credential, self.image.as_ref(), cancel)
            .await
    }

    pub fn view(&self) -> SessionView {
        self.workflow.view()
    }
}
