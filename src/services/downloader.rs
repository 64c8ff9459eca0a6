//! 视频下载服务 - 业务能力层
//!
//! 只负责"把生成好的视频保存到本地"能力

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::models::VideoUrl;

/// 下载视频到指定路径，返回写入的字节数
///
/// 先写入同目录下的 `.part` 文件，完成后再改名，失败时不会留下不完整的文件
pub async fn download_video(http: &reqwest::Client, url: &VideoUrl, dest: &Path) -> Result<u64> {
    info!("正在下载视频: {}", url);

    let part = partial_path(dest);
    match write_to(http, url, &part).await {
        Ok(written) => {
            tokio::fs::rename(&part, dest)
                .await
                .with_context(|| format!("无法保存文件: {}", dest.display()))?;
            debug!("视频已写入 {} ({} 字节)", dest.display(), written);
            Ok(written)
        }
        Err(e) => {
            if tokio::fs::remove_file(&part).await.is_ok() {
                warn!("下载失败，已删除不完整的文件: {}", part.display());
            }
            Err(e)
        }
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

async fn write_to(http: &reqwest::Client, url: &VideoUrl, path: &Path) -> Result<u64> {
    let mut response = http
        .get(url.as_str())
        .send()
        .await
        .with_context(|| format!("视频下载请求失败: {}", url))?
        .error_for_status()
        .with_context(|| format!("视频下载失败: {}", url))?;

    let mut file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("无法创建文件: {}", path.display()))?;

    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await.context("读取视频数据失败")? {
        file.write_all(&chunk)
            .await
            .with_context(|| format!("写入文件失败: {}", path.display()))?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    Ok(written)
}
