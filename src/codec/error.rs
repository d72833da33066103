use thiserror::Error;

/// 媒体编码错误
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("无效图像帧: {0}")]
    InvalidFrame(String),

    #[error("图像编码失败: {0}")]
    Image(#[from] image::ImageError),

    #[error("WebP 编码失败: {0}")]
    WebP(String),

    #[error("视频编码失败: {0}")]
    Video(String),
}
