use smart_default::SmartDefault;

use crate::codec::ImageFormat;

/// 一次图片批次上传的配置
#[derive(Debug, Clone, SmartDefault)]
pub struct ImageUploadRequest {
    #[default = "comfyui"]
    pub prefix: String,
    /// 原始目录输入，由上传流程统一规范化
    pub folder: String,
    #[default(ImageFormat::Jpeg)]
    pub format: ImageFormat,
    #[default = 75]
    pub quality: u8,
    #[default = true]
    pub include_date: bool,
}

/// 一次视频上传的配置
#[derive(Debug, Clone, SmartDefault)]
pub struct VideoUploadRequest {
    #[default = "comfyui_video"]
    pub prefix: String,
    #[default = "video"]
    pub folder: String,
    #[default = true]
    pub include_date: bool,
    pub custom_filename: Option<String>,
    /// 对象的 Content-Type，缺省 video/mp4
    pub content_type: Option<String>,
}

impl VideoUploadRequest {
    pub fn content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or("video/mp4")
    }
}

/// 视频 URL 与分片策略（仅视频路径使用）
#[derive(Debug, Clone, SmartDefault)]
pub struct UploadPolicy {
    pub use_temporary_url: bool,
    #[default = 24]
    pub expiration_hours: u32,
    /// 分片上传阈值（MB）；None 表示始终单次上传
    pub multipart_threshold_mb: Option<u64>,
}
