//! 视频生成提交流程 - 流程层
//!
//! 核心职责：定义"一次生成"的完整流程
//!
//! 流程顺序：
//! 1. 检查图片和 API 密钥（不通过则不发起任何请求）
//! 2. 图片编码为 base64 data URI
//! 3. 提交任务并等待结束（可取消，有截止时间）
//! 4. 把结果映射为成功或失败状态

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::clients::VideoJobApi;
use crate::config::Config;
use crate::error::SubmitError;
use crate::models::{extract_video_url, Credential, JobRequest, SourceImage, VideoUrl};
use crate::services::encode_image;
use crate::utils::logging::truncate_text;
use crate::workflow::state::{SessionState, SessionView};
use crate::workflow::submission_ctx::SubmissionCtx;

/// 提交流程
///
/// - 同一时间最多一个任务在进行
/// - 每次调用最多发起一次任务提交，不做重试
/// - 凭证按次传入客户端，不设置全局配置
pub struct SubmissionWorkflow<C> {
    client: C,
    config: Config,
    state: Mutex<SessionState>,
}

impl<C: VideoJobApi> SubmissionWorkflow<C> {
    pub fn new(client: C, config: Config) -> Self {
        Self {
            client,
            config,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// 当前界面状态
    pub fn view(&self) -> SessionView {
        self.lock_state().view()
    }

    pub fn is_busy(&self) -> bool {
        self.lock_state().is_busy()
    }

    pub(crate) fn clear_error(&self) {
        self.lock_state().clear_error();
    }

    pub(crate) fn clear_credential_error(&self) {
        self.lock_state().clear_credential_error();
    }

    /// 发起一次生成
    pub async fn submit(
        &self,
        credential: &str,
        image: Option<&SourceImage>,
        cancel: &CancellationToken,
    ) -> Result<VideoUrl, SubmitError> {
        let (credential, image, attempt) = self.precheck(credential, image)?;
        let _guard = BusyGuard { workflow: self };

        let ctx = SubmissionCtx::new(attempt, self.config.model_id.clone(), image.describe());
        info!("{} 🎬 开始生成视频", ctx);

        let outcome = self.run(&ctx, &credential, image, cancel).await;

        match &outcome {
            Ok(url) => {
                info!("{} ✓ 视频生成成功: {}", ctx, url);
                self.lock_state().succeed(url);
            }
            Err(e) => {
                error!("{} ❌ {}", ctx, e);
                self.lock_state().fail(e);
            }
        }

        outcome
    }

    /// 同步检查前置条件，通过后进入生成中状态
    fn precheck<'a>(
        &self,
        credential: &str,
        image: Option<&'a SourceImage>,
    ) -> Result<(Credential, &'a SourceImage, u64), SubmitError> {
        let mut state = self.lock_state();

        if state.is_busy() {
            warn!("已有任务正在生成中，忽略本次提交");
            return Err(SubmitError::Busy);
        }

        let Some(image) = image else {
            let err = SubmitError::MissingImage;
            warn!("{}", err);
            state.reject(&err);
            return Err(err);
        };

        let Some(credential) = Credential::parse(credential) else {
            let err = SubmitError::MissingCredential;
            warn!("{}", err);
            state.reject(&err);
            return Err(err);
        };

        let attempt = state.begin();
        Ok((credential, image, attempt))
    }

    async fn run(
        &self,
        ctx: &SubmissionCtx,
        credential: &Credential,
        image: &SourceImage,
        cancel: &CancellationToken,
    ) -> Result<VideoUrl, SubmitError> {
        let job = self.run_job(ctx, credential, image);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("{} 任务已取消", ctx);
                Err(SubmitError::Cancelled)
            }
            limit = wait_deadline(self.config.deadline()) => {
                warn!("{} 任务超过 {} 秒未完成", ctx, limit.as_secs());
                Err(SubmitError::Timeout(limit))
            }
            result = job => result,
        }
    }

    async fn run_job(
        &self,
        ctx: &SubmissionCtx,
        credential: &Credential,
        image: &SourceImage,
    ) -> Result<VideoUrl, SubmitError> {
        info!("{} 📷 正在编码图片...", ctx);
        let encoded = encode_image(image).await?;

        let request = JobRequest {
            image_url: encoded.data_uri(self.config.preserve_mime),
            num_frames: self.config.num_frames,
            num_inference_steps: self.config.num_inference_steps,
        };

        if self.config.verbose_logging {
            info!("{} image_url: {}", ctx, truncate_text(&request.image_url, 64));
        }

        info!(
            "{} 📤 正在提交任务 (帧数: {}, 推理步数: {})",
            ctx, request.num_frames, request.num_inference_steps
        );

        let payload = self
            .client
            .subscribe(credential, &self.config.model_id, &request)
            .await?;

        extract_video_url(&payload).ok_or_else(|| {
            warn!(
                "{} 结果中没有视频: {}",
                ctx,
                truncate_text(&payload.to_string(), 200)
            );
            SubmitError::GenerationFailed
        })
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// 等待截止时间，返回超时时长；没有截止时间时永不返回
async fn wait_deadline(deadline: Option<Duration>) -> Duration {
    match deadline {
        Some(limit) => {
            tokio::time::sleep(limit).await;
            limit
        }
        None => std::future::pending().await,
    }
}

/// 任务结束（包括被丢弃）时释放忙碌标记
struct BusyGuard<'a, C: VideoJobApi> {
    workflow: &'a SubmissionWorkflow<C>,
}

impl<C: VideoJobApi> Drop for BusyGuard<'_, C> {
    fn drop(&mut self) {
        self.workflow.lock_state().finish();
    }
}
