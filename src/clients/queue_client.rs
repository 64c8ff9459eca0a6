/// 视频生成队列 API 客户端
///
/// 封装任务提交、状态轮询和结果获取
use async_trait::async_trait;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::ClientError;
use crate::models::{Credential, JobRequest, JobState, QueueStatus, QueueSubmitResponse};

/// 远程任务 API
///
/// 提交一个任务并等待其结束，返回原始结果。轮询由实现方负责
#[async_trait]
pub trait VideoJobApi: Send + Sync {
    async fn subscribe(
        &self,
        credential: &Credential,
        model_id: &str,
        request: &JobRequest,
    ) -> Result<Value, ClientError>;
}

/// fal.ai 队列客户端
pub struct FalQueueClient {
    http: reqwest::Client,
    base_url: String,
    poll_interval: Duration,
    request_logs: bool,
}

impl FalQueueClient {
    /// 创建新的队列客户端
    pub fn new(config: &Config) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// 复用已有的 HTTP 客户端
    pub fn with_client(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.queue_base_url.trim_end_matches('/').to_string(),
            poll_interval: config.poll_interval(),
            request_logs: config.request_logs,
        }
    }

    fn submit_url(&self, model_id: &str) -> String {
        format!("{}/{}", self.base_url, normalize_app_id(model_id))
    }

    fn status_query_url(&self, status_url: &str) -> String {
        if !self.request_logs {
            return status_url.to_string();
        }
        let sep = if status_url.contains('?') { '&' } else { '?' };
        format!("{}{}logs=1", status_url, sep)
    }

    /// 提交任务
    async fn submit(
        &self,
        credential: &Credential,
        model_id: &str,
        request: &JobRequest,
    ) -> Result<QueueSubmitResponse, ClientError> {
        let url = self.submit_url(model_id);
        debug!("提交任务: {}", url);

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth_header(credential))
            .json(request)
            .send()
            .await?;

        parse_response(response).await
    }

    /// 查询一次任务状态
    async fn poll_status(
        &self,
        credential: &Credential,
        status_url: &str,
    ) -> Result<QueueStatus, ClientError> {
        let response = self
            .http
            .get(self.status_query_url(status_url))
            .header(reqwest::header::AUTHORIZATION, auth_header(credential))
            .send()
            .await?;

        parse_response(response).await
    }

    /// 获取任务结果
    async fn fetch_result(
        &self,
        credential: &Credential,
        response_url: &str,
    ) -> Result<Value, ClientError> {
        let response = self
            .http
            .get(response_url)
            .header(reqwest::header::AUTHORIZATION, auth_header(credential))
            .send()
            .await?;

        parse_response(response).await
    }
}

#[async_trait]
impl VideoJobApi for FalQueueClient {
    async fn subscribe(
        &self,
        credential: &Credential,
        model_id: &str,
        request: &JobRequest,
    ) -> Result<Value, ClientError> {
        let job = self.submit(credential, model_id, request).await?;
        info!("任务已提交，request_id: {}", job.request_id);

        let mut last_position = None;
        loop {
            let status = self.poll_status(credential, &job.status_url).await?;
            log_provider_status(&status, &mut last_position);

            if check_status(&status)? {
                break;
            }
            tokio::time::sleep(self.poll_interval).await;
        }

        info!("任务完成，正在获取结果: {}", job.request_id);
        self.fetch_result(credential, &job.response_url).await
    }
}

/// 旧格式的 `<owner>-<app>` 转为 `<owner>/<app>`，已含 `/` 的 ID 保持不变
fn normalize_app_id(model_id: &str) -> String {
    let id = model_id.trim_start_matches('/');
    if id.contains('/') {
        return id.to_string();
    }

    if let Ok(re) = Regex::new(r"^([0-9]+)-([a-zA-Z0-9-]+)$") {
        if let Some(caps) = re.captures(id) {
            return format!("{}/{}", &caps[1], &caps[2]);
        }
    }
    id.to_string()
}

fn auth_header(credential: &Credential) -> String {
    format!("Key {}", credential.expose())
}

/// 判断任务是否结束
///
/// 已完成返回 `true`，仍在排队或运行返回 `false`，服务端报告失败时返回错误
fn check_status(status: &QueueStatus) -> Result<bool, ClientError> {
    match status.status {
        JobState::InQueue | JobState::InProgress => Ok(false),
        JobState::Completed => match &status.error {
            Some(err) => Err(ClientError::JobFailed(err.clone())),
            None => Ok(true),
        },
    }
}

fn log_provider_status(status: &QueueStatus, last_position: &mut Option<u64>) {
    if status.queue_position != *last_position {
        if let Some(position) = status.queue_position {
            info!("排队中，当前位置: {}", position);
        }
        *last_position = status.queue_position;
    }

    for log in status.logs.iter().flatten() {
        debug!(
            "[服务端 {}] {}",
            log.level.as_deref().unwrap_or("LOG"),
            log.message
        );
    }
}

/// 解析响应，非 2xx 状态码转为 `ClientError::Api`
async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!("API返回错误响应 ({}): {}", status.as_u16(), body);
        return Err(ClientError::Api {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
