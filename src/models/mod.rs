pub mod credential;
pub mod image;
pub mod job;
pub mod status;

pub use credential::Credential;
pub use image::{EncodedImage, ImageData, SourceImage};
pub use job::{
    extract_video_url, JobRequest, JobState, QueueLog, QueueStatus, QueueSubmitResponse, VideoUrl,
};
pub use status::UiStatus;
