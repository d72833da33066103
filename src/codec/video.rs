use bytes::Bytes;

use crate::codec::CodecError;

/// 视频容器格式（宿主目前只支持 MP4）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoContainer {
    Mp4,
}

/// 视频编码器选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCodec {
    Auto,
}

/// 宿主传入的视频句柄
///
/// 宿主持有实际的视频数据与编码管线，节点只要求能把整段视频
/// 序列化为指定容器格式的字节流。
pub trait Video: Send + Sync {
    fn save_to(&self, container: VideoContainer, codec: VideoCodec) -> Result<Bytes, CodecError>;
}
