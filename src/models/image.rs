//! 源图片与编码后的图片

use std::path::{Path, PathBuf};

/// 编码时未声明真实类型的图片一律按 JPEG 标记
pub const DEFAULT_MIME: &str = "image/jpeg";

/// 图片数据来源
#[derive(Debug, Clone)]
pub enum ImageData {
    /// 磁盘文件，编码时才读取
    File(PathBuf),
    /// 已在内存中的数据
    Memory(Vec<u8>),
}

/// 用户选择的源图片
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub data: ImageData,
    pub mime: String,
}

impl SourceImage {
    /// 从文件路径创建，根据扩展名推断类型
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mime = mime_from_extension(&path).to_string();
        Self {
            data: ImageData::File(path),
            mime,
        }
    }

    pub fn from_bytes(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            data: ImageData::Memory(bytes),
            mime: mime.into(),
        }
    }

    /// 用于日志和错误信息的描述
    pub fn describe(&self) -> String {
        match &self.data {
            ImageData::File(path) => path.display().to_string(),
            ImageData::Memory(bytes) => format!("<内存图片 {} 字节>", bytes.len()),
        }
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => DEFAULT_MIME,
    }
}

/// base64 编码后的图片
///
/// 每次提交前重新生成，不做缓存
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub base64: String,
    pub source_mime: String,
}

impl EncodedImage {
    /// 构建 data URI
    ///
    /// 默认始终使用 `image/jpeg` 前缀，`preserve_mime` 为真时使用源图片类型
    pub fn data_uri(&self, preserve_mime: bool) -> String {
        let mime = if preserve_mime {
            self.source_mime.as_str()
        } else {
            DEFAULT_MIME
        };
        format!("data:{};base64,{}", mime, self.base64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(SourceImage::from_path("a/b/cat.PNG").mime, "image/png");
        assert_eq!(SourceImage::from_path("dog.webp").mime, "image/webp");
        assert_eq!(SourceImage::from_path("photo.jpg").mime, "image/jpeg");
        assert_eq!(SourceImage::from_path("no_extension").mime, DEFAULT_MIME);
    }

    #[test]
    fn test_data_uri_labels_jpeg_by_default() {
        let encoded = EncodedImage {
            base64: "iVBORw0KGgo=".to_string(),
            source_mime: "image/png".to_string(),
        };

        assert_eq!(encoded.data_uri(false), "data:image/jpeg;base64,iVBORw0KGgo=");
        assert_eq!(encoded.data_uri(true), "data:image/png;base64,iVBORw0KGgo=");
    }
}
