//! 图片编码服务 - 业务能力层
//!
//! 只负责"把图片读入内存并转成 base64"能力，不关心流程

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use crate::error::SubmitError;
use crate::models::{EncodedImage, ImageData, SourceImage};

/// 读取图片全部内容并编码为 base64
///
/// 读取失败返回 `EncodingFailed`
pub async fn encode_image(image: &SourceImage) -> Result<EncodedImage, SubmitError> {
    let base64 = match &image.data {
        ImageData::File(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| SubmitError::EncodingFailed {
                    path: path.display().to_string(),
                    source,
                })?;
            debug!("读取图片 {}: {} 字节", path.display(), bytes.len());
            STANDARD.encode(bytes)
        }
        ImageData::Memory(bytes) => STANDARD.encode(bytes),
    };

    debug!("图片编码完成，base64 长度: {}", base64.len());

    Ok(EncodedImage {
        base64,
        source_mime: image.mime.clone(),
    })
}
