//! 阿里云 OSS 上传节点
//!
//! 为节点式媒体流水线宿主提供把图片批次/视频上传到 OSS 并返回
//! 访问 URL 的节点实现。
//!
//! ## 模块
//!
//! - **codec**: 媒体编码协作方（帧编码、视频句柄接口）
//! - **oss**: 对象存储客户端（阿里云 OSS 实现与接口抽象）
//! - **upload**: 上传编排核心（对象键生成、分片策略、URL 构造）
//! - **node**: 宿主可见的节点变体与注册表
//!
//! ## 设计要点
//!
//! - 每次调用构造全新的客户端与缓冲区，调用之间不保留任何状态
//! - 图片批次逐帧顺序上传，单帧失败不影响其余帧
//! - 视频按大小阈值在单次上传与 10MB 分片上传之间选择

pub mod codec;
pub mod node;
pub mod oss;
pub mod upload;

pub use codec::{CodecError, Frame, FrameEncoder, ImageCodec, ImageFormat, Video};
pub use node::{
    display_name_mappings, get_node, node_names, MediaInput, Node, NodeSchema, OutputValue,
};
pub use oss::{AliOssClient, Credentials, ObjectStorage, StorageError, OSS_ENDPOINTS};
pub use upload::{UploadError, UploadPolicy, Uploader};
