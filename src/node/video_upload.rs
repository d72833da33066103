use async_trait::async_trait;
use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smart_default::SmartDefault;
use tracing::info;

use crate::codec::ImageCodec;
use crate::node::{from_params, MediaInput, Node, NodeSchema, OutputValue, ParamSpec};
use crate::oss::{AliOssClient, Credentials, OSS_ENDPOINTS};
use crate::upload::{
    RandomTokenSource, UploadError, UploadPolicy, Uploader, VideoUploadRequest,
};

/// 视频上传节点：整体单次上传，可选限时签名 URL
pub struct VideoUploadNode;

#[derive(Debug, Clone, Serialize, Deserialize, SmartDefault, Validate)]
#[serde(default)]
pub struct VideoUploadParams {
    #[garde(skip)]
    #[default = "comfyui_video"]
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
    #[default = "video"]
    pub folder: String,
    #[garde(skip)]
    #[default = true]
    pub include_date: bool,
    #[garde(skip)]
    pub use_temporary_url: bool,
    #[garde(range(min = 1, max = 720))]
    #[default = 24]
    pub expiration_hours: u32,
    /// 空串表示自动命名
    #[garde(skip)]
    pub custom_filename: String,
}

impl VideoUploadParams {
    fn credentials(&self) -> Credentials {
        Credentials {
            access_key_id: self.access_key_id.clone(),
            access_key_secret: self.access_key_secret.clone(),
            bucket: self.bucket_name.clone(),
            endpoint: self.endpoint.clone(),
        }
    }

    fn request(&self) -> VideoUploadRequest {
        VideoUploadRequest {
            prefix: self.prefix.clone(),
            folder: self.folder.clone(),
            include_date: self.include_date,
            custom_filename: if self.custom_filename.trim().is_empty() {
                None
            } else {
                Some(self.custom_filename.clone())
            },
            content_type: None,
        }
    }

    fn policy(&self) -> UploadPolicy {
        UploadPolicy {
            use_temporary_url: self.use_temporary_url,
            expiration_hours: self.expiration_hours,
            multipart_threshold_mb: None,
        }
    }

    fn check(&self) -> Result<(), UploadError> {
        self.validate()
            .map_err(|e| UploadError::Validation(e.to_string()))?;
        self.credentials().validate().map_err(UploadError::Validation)
    }
}

impl VideoUploadNode {
    async fn run(&self, media: MediaInput, params: &Value) -> Result<String, UploadError> {
        let parsed: VideoUploadParams = from_params(params)?;
        parsed.check()?;

        let video = match media {
            MediaInput::Video(video) => video,
            MediaInput::Images(_) => {
                return Err(UploadError::Validation("输入必须是视频".to_string()))
            }
        };

        info!(prefix = %parsed.prefix, temporary = parsed.use_temporary_url, "开始上传视频");

        let creds = parsed.credentials();
        let store = AliOssClient::new(&creds);
        let codec = ImageCodec::new();
        let tokens = RandomTokenSource;
        let uploader = Uploader::new(&store, &codec, &tokens);
        let outcome = uploader
            .upload_video(video.as_ref(), &creds, &parsed.request(), &parsed.policy())
            .await?;
        Ok(outcome.url)
    }
}

#[async_trait]
impl Node for VideoUploadNode {
    fn name(&self) -> &'static str {
        "OSSVideoUploadNode"
    }

    fn display_name(&self) -> &'static str {
        "视频上传到OSS"
    }

    fn schema(&self) -> NodeSchema {
        NodeSchema {
            inputs: vec![
                ParamSpec::video("video"),
                ParamSpec::string("prefix", "comfyui_video"),
                ParamSpec::string("access_key_id", "access_key_id"),
                ParamSpec::string("access_key_secret", "access_key_secret"),
                ParamSpec::string("bucket_name", "bucket_name"),
                ParamSpec::choice("endpoint", &OSS_ENDPOINTS, "oss-cn-hangzhou.aliyuncs.com"),
                ParamSpec::string("folder", "video"),
                ParamSpec::boolean("include_date", true),
                ParamSpec::boolean("use_temporary_url", false).optional(),
                ParamSpec::int("expiration_hours", 24, 1, 720).optional(),
                ParamSpec::string("custom_filename", "").optional(),
            ],
            outputs: &["上传结果"],
        }
    }

    fn validate(&self, params: &Value) -> Result<(), UploadError> {
        let parsed: VideoUploadParams = from_params(params)?;
        parsed.check()
    }

    async fn execute(&self, media: MediaInput, params: &Value) -> Vec<OutputValue> {
        let text = match self.run(media, params).await {
            Ok(url) => url,
            Err(e) => format!("视频上传失败: {}", e),
        };
        vec![OutputValue::Text(text)]
    }
}
