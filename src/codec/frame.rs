use serde::{Deserialize, Serialize};

use crate::codec::CodecError;

/// 宿主传入的内存图像帧（RGB8 像素，按行排列）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    /// 构造帧并校验像素数据长度与尺寸一致
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CodecError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(CodecError::InvalidFrame(format!(
                "像素数据长度 {} 与尺寸 {}x{} 不匹配（期望 {}）",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

/// 支持的图片输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    #[serde(rename = "JPEG")]
    Jpeg,
    #[serde(rename = "PNG")]
    Png,
    #[serde(rename = "WEBP")]
    WebP,
}

impl ImageFormat {
    /// 宿主参数枚举使用的名称集合
    pub const NAMES: [&'static str; 3] = ["JPEG", "PNG", "WEBP"];

    /// 对象键使用的扩展名
    pub fn ext(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::WebP => "webp",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::WebP => "image/webp",
        }
    }
}
