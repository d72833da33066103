use std::io::Cursor;

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage};

use crate::codec::{CodecError, Frame, FrameEncoder, ImageFormat};

/// 基于 image/webp 库的帧编码实现
///
/// JPEG 按质量编码，PNG 无损（忽略质量），WebP 走有损编码。
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl ImageCodec {
    pub fn new() -> Self {
        Self
    }

    fn to_dynamic(frame: &Frame) -> Result<DynamicImage, CodecError> {
        let img = RgbImage::from_raw(frame.width, frame.height, frame.data.clone()).ok_or_else(
            || {
                CodecError::InvalidFrame(format!(
                    "像素数据长度与尺寸 {}x{} 不匹配",
                    frame.width, frame.height
                ))
            },
        )?;
        Ok(DynamicImage::ImageRgb8(img))
    }
}

impl FrameEncoder for ImageCodec {
    fn encode_frame(
        &self,
        frame: &Frame,
        format: ImageFormat,
        quality: u8,
    ) -> Result<Bytes, CodecError> {
        let img = Self::to_dynamic(frame)?;
        let mut buf = Vec::new();
        match format {
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
                img.write_with_encoder(encoder)?;
            }
            ImageFormat::Png => {
                img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
            }
            ImageFormat::WebP => {
                let encoder =
                    webp::Encoder::from_image(&img).map_err(|e| CodecError::WebP(e.to_string()))?;
                buf = encoder.encode(quality as f32).to_vec();
            }
        }
        Ok(Bytes::from(buf))
    }
}
