//! # Image To Video
//!
//! 上传一张图片，调用 fal.ai 队列 API 生成视频
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 远程任务 API，负责提交、轮询和获取结果
//! - `VideoJobApi` - 流程层依赖的抽象，`FalQueueClient` 为 HTTP 实现
//!
//! ### ② 业务能力层（Services）
//! - `encoder` - 图片读取与 base64 编码
//! - `downloader` - 保存生成的视频
//!
//! ### ③ 流程层（Workflow）
//! - `SubmissionWorkflow` - 一次生成的完整流程（检查 → 编码 → 提交 → 结果）
//! - `Session` - 持有用户输入和界面状态
//!
//! ### ④ 入口（App）
//! - `app` - 命令行参数、Ctrl-C 取消、结果输出
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

#[cfg(test)]
mod test_support;

// 重新导出常用类型
pub use app::{App, Cli};
pub use clients::{FalQueueClient, VideoJobApi};
pub use config::Config;
pub use error::{ClientError, SubmitError};
pub use models::{Credential, SourceImage, UiStatus, VideoUrl};
pub use workflow::{Session, SessionView, SubmissionWorkflow};
