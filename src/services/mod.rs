pub mod downloader;
pub mod encoder;

pub use downloader::download_video;
pub use encoder::encode_image;
