mod error;
mod filename;
mod strategy;
mod types;
mod uploader;
mod url;

pub use error::UploadError;
pub use filename::{
    generate_timestamp, image_key, normalize_folder, video_key, RandomTokenSource, TokenSource,
};
pub use strategy::{put_with_strategy, UploadStats, PART_SIZE};
pub use types::{ImageUploadRequest, UploadPolicy, VideoUploadRequest};
pub use uploader::{Uploader, VideoOutcome};
pub use url::{ensure_https, public_url};
