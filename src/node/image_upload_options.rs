use async_trait::async_trait;
use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smart_default::SmartDefault;
use tracing::info;

use crate::codec::{ImageCodec, ImageFormat};
use crate::node::{from_params, MediaInput, Node, NodeSchema, OutputValue, ParamSpec};
use crate::oss::{AliOssClient, Credentials, OSS_ENDPOINTS};
use crate::upload::{ImageUploadRequest, RandomTokenSource, UploadError, Uploader};

/// 图片上传节点（可选格式/质量/时间戳）
pub struct ImageUploadOptionsNode;

#[derive(Debug, Clone, Serialize, Deserialize, SmartDefault, Validate)]
#[serde(default)]
pub struct ImageUploadOptionsParams {
    #[garde(skip)]
    #[default = "comfyui"]
    pub prefix: String,
    #[garde(skip)]
    pub access_key_id: String,
    #[garde(skip)]
    pub access_key_secret: String,
    #[garde(skip)]
    pub bucket_name: String,
    #[garde(skip)]
    #[default = "oss-cn-hangzhou.aliyuncs.com"]
    pub endpoint: String,
    #[garde(skip)]
    pub folder: String,
    #[garde(skip)]
    #[default(ImageFormat::Jpeg)]
    pub format: ImageFormat,
    #[garde(skip)]
    #[default = true]
    pub include_date: bool,
    /// PNG 忽略质量参数
    #[garde(range(min = 1, max = 100))]
    #[default = 90]
    pub quality: u8,
}

impl ImageUploadOptionsParams {
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
            format: self.format,
            quality: self.quality,
            include_date: self.include_date,
        }
    }

    fn check(&self) -> Result<(), UploadError> {
        self.validate()
            .map_err(|e| UploadError::Validation(e.to_string()))?;
        self.credentials().validate().map_err(UploadError::Validation)
    }
}

impl ImageUploadOptionsNode {
    async fn run(&self, media: MediaInput, params: &Value) -> Result<String, UploadError> {
        let parsed: ImageUploadOptionsParams = from_params(params)?;
        parsed.check()?;

        let frames = match media {
            MediaInput::Images(frames) => frames,
            MediaInput::Video(_) => {
                return Err(UploadError::Validation("输入必须是图片".to_string()))
            }
        };

        info!(
            count = frames.len(),
            format = ?parsed.format,
            quality = parsed.quality,
            "开始上传图片批次"
        );

        let creds = parsed.credentials();
        let store = AliOssClient::new(&creds);
        let codec = ImageCodec::new();
        let tokens = RandomTokenSource;
        let uploader = Uploader::new(&store, &codec, &tokens);
        Ok(uploader.upload_images(&frames, &creds, &parsed.request()).await)
    }
}

#[async_trait]
impl Node for ImageUploadOptionsNode {
    fn name(&self) -> &'static str {
        "OSSAdvancedUploadNode"
    }

    fn display_name(&self) -> &'static str {
        "高级OSS上传"
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
                ParamSpec::choice("format", &ImageFormat::NAMES, "JPEG"),
                ParamSpec::boolean("include_date", true),
                ParamSpec::int("quality", 90, 1, 100),
            ],
            outputs: &["上传结果"],
        }
    }

    fn validate(&self, params: &Value) -> Result<(), UploadError> {
        let parsed: ImageUploadOptionsParams = from_params(params)?;
        parsed.check()
    }

    async fn execute(&self, media: MediaInput, params: &Value) -> Vec<OutputValue> {
        let text = match self.run(media, params).await {
            Ok(joined) => joined,
            Err(e) => e.to_string(),
        };
        vec![OutputValue::Text(text)]
    }
}
