use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smart_default::SmartDefault;
use tracing::info;

use crate::codec::{ImageCodec, ImageFormat};
use crate::node::{from_params, MediaInput, Node, NodeSchema, OutputValue, ParamSpec};
use crate::oss::{AliOssClient, Credentials, OSS_ENDPOINTS};
use crate::upload::{ImageUploadRequest, RandomTokenSource, UploadError, Uploader};

/// 固定 JPEG 输出使用的编码质量
const JPEG_QUALITY: u8 = 75;

/// 图片自动上传节点：固定 JPEG、始终带时间戳的最简参数集
pub struct ImageUploadNode;

#[derive(Debug, Clone, Serialize, Deserialize, SmartDefault)]
#[serde(default)]
pub struct ImageUploadParams {
    #[default = "comfyui"]
    pub prefix: String,
    pub access_key_id: String,
    pub access_key_secret: String,
    pub bucket_name: String,
    #[default = "oss-cn-hangzhou.aliyuncs.com"]
    pub endpoint: String,
    pub folder: String,
}

impl ImageUploadParams {
    fn credentials(&self) -> Credentials {
        Credentials {
            access_key_id: self.access_key_id.clone(),
            access_key_secret: self.access_key_secret.clone(),
            bucket: self.bucket_name.clone(),
            endpoint: self.endpoint.clone(),
        }
    }

    fn request(&self) -> ImageUploadRequest {
        ImageUploadRequest {
            prefix: self.prefix.clone(),
            folder: self.folder.clone(),
            format: ImageFormat::Jpeg,
            quality: JPEG_QUALITY,
            include_date: true,
        }
    }
}

impl ImageUploadNode {
    async fn run(&self, media: MediaInput, params: &Value) -> Result<String, UploadError> {
        let parsed: ImageUploadParams = from_params(params)?;
        let creds = parsed.credentials();
        creds.validate().map_err(UploadError::Validation)?;

        let frames = match media {
            MediaInput::Images(frames) => frames,
            MediaInput::Video(_) => {
                return Err(UploadError::Validation("输入必须是图片".to_string()))
            }
        };

        info!(count = frames.len(), prefix = %parsed.prefix, "开始上传图片批次");

        let store = AliOssClient::new(&creds);
        let codec = ImageCodec::new();
        let tokens = RandomTokenSource;
        let uploader = Uploader::new(&store, &codec, &tokens);
        Ok(uploader.upload_images(&frames, &creds, &parsed.request()).await)
    }
}

#[async_trait]
impl Node for ImageUploadNode {
    fn name(&self) -> &'static str {
        "OSSAutoUploadNode"
    }

    fn display_name(&self) -> &'static str {
        "自动保存图片到OSS"
    }

    fn schema(&self) -> NodeSchema {
        NodeSchema {
            inputs: vec![
                ParamSpec::image("image"),
                ParamSpec::string("prefix", "comfyui"),
                ParamSpec::string("access_key_id", "access_key_id"),
                ParamSpec::string("access_key_secret", "access_key_secret"),
                ParamSpec::string("bucket_name", "bucket_name"),
                ParamSpec::choice("endpoint", &OSS_ENDPOINTS, "oss-cn-hangzhou.aliyuncs.com"),
                ParamSpec::string("folder", ""),
            ],
            outputs: &["上传结果"],
        }
    }

    fn validate(&self, params: &Value) -> Result<(), UploadError> {
        let parsed: ImageUploadParams = from_params(params)?;
        parsed.credentials().validate().map_err(UploadError::Validation)
    }

    async fn execute(&self, media: MediaInput, params: &Value) -> Vec<OutputValue> {
        let text = match self.run(media, params).await {
            Ok(joined) => joined,
            Err(e) => e.to_string(),
        };
        vec![OutputValue::Text(text)]
    }
}
