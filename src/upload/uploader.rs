use tracing::{info, warn};

use crate::codec::{Frame, FrameEncoder, Video, VideoCodec, VideoContainer};
use crate::oss::{Credentials, ObjectStorage, PutOptions};
use crate::upload::{
    ensure_https, generate_timestamp, image_key, normalize_folder, public_url, put_with_strategy,
    video_key, ImageUploadRequest, TokenSource, UploadError, UploadPolicy, UploadStats,
    VideoUploadRequest,
};

/// 上传编排器
///
/// 图片批次逐帧顺序处理，单帧失败转为行内错误文案后继续；
/// 视频单对象上传，任何失败都使整次调用失败。两条路径的差异
/// 是产品行为，不做统一。
pub struct Uploader<'a> {
    store: &'a dyn ObjectStorage,
    encoder: &'a dyn FrameEncoder,
    tokens: &'a dyn TokenSource,
}

/// 视频上传结果
#[derive(Debug, Clone)]
pub struct VideoOutcome {
    pub url: String,
    pub stats: UploadStats,
}

impl<'a> Uploader<'a> {
    pub fn new(
        store: &'a dyn ObjectStorage,
        encoder: &'a dyn FrameEncoder,
        tokens: &'a dyn TokenSource,
    ) -> Self {
        Self {
            store,
            encoder,
            tokens,
        }
    }

    /// 上传图片批次，返回按输入顺序以 ", " 连接的逐帧结果
    pub async fn upload_images(
        &self,
        frames: &[Frame],
        creds: &Credentials,
        req: &ImageUploadRequest,
    ) -> String {
        let folder = normalize_folder(&req.folder);
        let mut results = Vec::with_capacity(frames.len());

        for (index, frame) in frames.iter().enumerate() {
            let timestamp = if req.include_date {
                generate_timestamp()
            } else {
                String::new()
            };
            let key = image_key(
                &folder,
                &req.prefix,
                &timestamp,
                index,
                &self.tokens.next_token(),
                req.format.ext(),
            );

            match self.put_frame(frame, &key, creds, req).await {
                Ok(url) => results.push(url),
                Err(e) => {
                    warn!(key = %key, error = %e, "图片上传失败，继续后续帧");
                    let msg = match &e {
                        UploadError::Storage { .. } => e.to_string(),
                        other => format!("上传失败 {}: {}", key, other),
                    };
                    results.push(msg);
                }
            }
        }

        results.join(", ")
    }

    async fn put_frame(
        &self,
        frame: &Frame,
        key: &str,
        creds: &Credentials,
        req: &ImageUploadRequest,
    ) -> Result<String, UploadError> {
        let data = self.encoder.encode_frame(frame, req.format, req.quality)?;
        info!(key, size = data.len(), "上传图片");
        self.store
            .put_object(key, data, PutOptions::with_content_type(req.format.content_type()))
            .await
            .map_err(|e| UploadError::storage(key, e))?;
        Ok(public_url(&creds.bucket, &creds.endpoint, key))
    }

    /// 上传单个视频并返回 URL 与统计
    pub async fn upload_video(
        &self,
        video: &dyn Video,
        creds: &Credentials,
        req: &VideoUploadRequest,
        policy: &UploadPolicy,
    ) -> Result<VideoOutcome, UploadError> {
        let folder = normalize_folder(&req.folder);
        let timestamp = if req.include_date {
            Some(generate_timestamp())
        } else {
            None
        };
        let token = self.tokens.next_token();
        let key = video_key(
            &folder,
            &req.prefix,
            timestamp.as_deref(),
            &token,
            req.custom_filename.as_deref(),
        );

        info!(key = %key, "上传视频");

        let data = video.save_to(VideoContainer::Mp4, VideoCodec::Auto)?;
        let stats = put_with_strategy(
            self.store,
            &key,
            data,
            PutOptions::with_content_type(req.content_type()),
            policy.multipart_threshold_mb,
        )
        .await
        .map_err(|e| UploadError::storage(&key, e))?;

        let url = if policy.use_temporary_url {
            ensure_https(
                self.store
                    .sign_url(&key, policy.expiration_hours as u64 * 3600),
            )
        } else {
            public_url(&creds.bucket, &creds.endpoint, &key)
        };

        info!(
            key = %key,
            size = stats.total_bytes,
            elapsed_secs = stats.elapsed.as_secs(),
            "视频上传完成"
        );

        Ok(VideoOutcome { url, stats })
    }
}
