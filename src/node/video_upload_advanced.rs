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
    RandomTokenSource, UploadError, UploadPolicy, Uploader, VideoOutcome, VideoUploadRequest,
};

/// 高级视频上传节点：分片阈值可配，额外输出文件大小与耗时
pub struct VideoUploadAdvancedNode;

#[derive(Debug, Clone, Serialize, Deserialize, SmartDefault, Validate)]
#[serde(default)]
pub struct VideoUploadAdvancedParams {
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
    /// 超过该大小（MB）切换到分片上传
    #[garde(range(min = 1, max = 1000))]
    #[default = 100]
    pub multipart_threshold: u64,
    #[garde(skip)]
    pub use_temporary_url: bool,
    #[garde(range(min = 1, max = 720))]
    #[default = 24]
    pub expiration_hours: u32,
    #[garde(skip)]
    pub custom_filename: String,
    #[garde(skip)]
    #[default = "video/mp4"]
    pub content_type: String,
}

impl VideoUploadAdvancedParams {
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
            content_type: Some(self.content_type.clone()),
        }
    }

    fn policy(&self) -> UploadPolicy {
        UploadPolicy {
            use_temporary_url: self.use_temporary_url,
            expiration_hours: self.expiration_hours,
            multipart_threshold_mb: Some(self.multipart_threshold),
        }
    }

    fn check(&self) -> Result<(), UploadError> {
        self.validate()
            .map_err(|e| UploadError::Validation(e.to_string()))?;
        self.credentials().validate().map_err(UploadError::Validation)
    }
}

impl VideoUploadAdvancedNode {
    async fn run(&self, media: MediaInput, params: &Value) -> Result<VideoOutcome, UploadError> {
        let parsed: VideoUploadAdvancedParams = from_params(params)?;
        parsed.check()?;

        let video = match media {
            MediaInput::Video(video) => video,
            MediaInput::Images(_) => {
                return Err(UploadError::Validation("输入必须是视频".to_string()))
            }
        };

        info!(
            prefix = %parsed.prefix,
            threshold_mb = parsed.multipart_threshold,
            "开始上传视频"
        );

        let creds = parsed.credentials();
        let store = AliOssClient::new(&creds);
        let codec = ImageCodec::new();
        let tokens = RandomTokenSource;
        let uploader = Uploader::new(&store, &codec, &tokens);
        uploader
            .upload_video(video.as_ref(), &creds, &parsed.request(), &parsed.policy())
            .await
    }
}

#[async_trait]
impl Node for VideoUploadAdvancedNode {
    fn name(&self) -> &'static str {
        "OSSVideoAdvancedUploadNode"
    }

    fn display_name(&self) -> &'static str {
        "高级视频上传到OSS"
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
                ParamSpec::int("multipart_threshold", 100, 1, 1000),
                ParamSpec::boolean("use_temporary_url", false).optional(),
                ParamSpec::int("expiration_hours", 24, 1, 720).optional(),
                ParamSpec::string("custom_filename", "").optional(),
                ParamSpec::string("content_type", "video/mp4").optional(),
            ],
            outputs: &["上传结果", "文件大小", "上传时间(秒)"],
        }
    }

    fn validate(&self, params: &Value) -> Result<(), UploadError> {
        let parsed: VideoUploadAdvancedParams = from_params(params)?;
        parsed.check()
    }

    async fn execute(&self, media: MediaInput, params: &Value) -> Vec<OutputValue> {
        match self.run(media, params).await {
            Ok(outcome) => {
                let size_mb = outcome.stats.total_bytes as f64 / (1024.0 * 1024.0);
                vec![
                    OutputValue::Text(outcome.url),
                    OutputValue::Text(format!("{:.2} MB", size_mb)),
                    OutputValue::Int(outcome.stats.elapsed.as_secs() as i64),
                ]
            }
            Err(e) => vec![
                OutputValue::Text(format!("视频上传失败: {}", e)),
                OutputValue::Text("0 MB".to_string()),
                OutputValue::Int(0),
            ],
        }
    }
}
