mod ali_oss;
mod client;
mod endpoint;
mod error;
mod types;

pub use ali_oss::AliOssClient;
pub use client::ObjectStorage;
pub use endpoint::{is_known_endpoint, OSS_ENDPOINTS};
pub use error::StorageError;
pub use types::{Credentials, PartInfo, PutOptions};
