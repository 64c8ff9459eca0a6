pub mod queue_client;

pub use queue_client::{FalQueueClient, VideoJobApi};
