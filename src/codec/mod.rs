mod error;
mod frame;
mod image_codec;
mod video;

pub use error::CodecError;
pub use frame::{Frame, ImageFormat};
pub use image_codec::ImageCodec;
pub use video::{Video, VideoCodec, VideoContainer};

use bytes::Bytes;

/// 图像帧编码器
///
/// 将宿主产出的内存帧序列化为指定格式的字节流。纯计算，无 I/O，
/// 便于在测试中用假实现替换。
pub trait FrameEncoder: Send + Sync {
    /// 按格式与质量编码一帧（PNG 忽略质量参数）
    fn encode_frame(
        &self,
        frame: &Frame,
        format: ImageFormat,
        quality: u8,
    ) -> Result<Bytes, CodecError>;
}
