//! 测试用协作方假实现：记录型对象存储、确定性编码器与标记来源
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use comfy_oss::codec::{
    CodecError, Frame, FrameEncoder, ImageFormat, Video, VideoCodec, VideoContainer,
};
use comfy_oss::oss::{Credentials, ObjectStorage, PartInfo, PutOptions, StorageError};
use comfy_oss::upload::TokenSource;

/// 存储假实现记录的调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Put {
        key: String,
        size: usize,
        content_type: Option<String>,
    },
    Init {
        key: String,
        content_type: Option<String>,
    },
    Part {
        key: String,
        upload_id: String,
        part_number: u32,
        size: usize,
    },
    Complete {
        key: String,
        upload_id: String,
        parts: Vec<(u32, String)>,
    },
    Abort {
        key: String,
        upload_id: String,
    },
    Sign {
        key: String,
        expire_secs: u64,
    },
}

/// 记录所有调用的对象存储假实现，可注入指定位置的失败
#[derive(Default)]
pub struct RecordingStore {
    pub calls: Mutex<Vec<StoreCall>>,
    /// 第 N 次 put_object 调用失败（0 起始）
    pub fail_put_at: Option<usize>,
    /// 指定分片序号上传失败
    pub fail_part_at: Option<u32>,
    pub fail_complete: bool,
    /// 签名 URL 返回 http 协议（模拟签名方返回非 https）
    pub sign_scheme_http: bool,
    pub put_count: AtomicUsize,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ObjectStorage for RecordingStore {
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        options: PutOptions,
    ) -> Result<(), StorageError> {
        let index = self.put_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_put_at == Some(index) {
            return Err(StorageError::provider("put_object", "模拟存储失败"));
        }
        self.record(StoreCall::Put {
            key: key.to_string(),
            size: data.len(),
            content_type: options.content_type,
        });
        Ok(())
    }

    async fn init_multipart_upload(
        &self,
        key: &str,
        options: PutOptions,
    ) -> Result<String, StorageError> {
        self.record(StoreCall::Init {
            key: key.to_string(),
            content_type: options.content_type,
        });
        Ok("upload-1".to_string())
    }

    async fn upload_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: u32,
        data: Bytes,
    ) -> Result<PartInfo, StorageError> {
        if self.fail_part_at == Some(part_number) {
            return Err(StorageError::Multipart(format!(
                "模拟分片 {} 失败",
                part_number
            )));
        }
        self.record(StoreCall::Part {
            key: key.to_string(),
            upload_id: upload_id.to_string(),
            part_number,
            size: data.len(),
        });
        Ok(PartInfo {
            part_number,
            etag: format!("etag-{}", part_number),
            size: data.len() as u64,
        })
    }

    async fn complete_multipart_upload(
        &self,
        key: &str,
        upload_id: &str,
        parts: Vec<PartInfo>,
    ) -> Result<(), StorageError> {
        if self.fail_complete {
            return Err(StorageError::Multipart("模拟完成失败".to_string()));
        }
        self.record(StoreCall::Complete {
            key: key.to_string(),
            upload_id: upload_id.to_string(),
            parts: parts.into_iter().map(|p| (p.part_number, p.etag)).collect(),
        });
        Ok(())
    }

    async fn abort_multipart_upload(
        &self,
        key: &str,
        upload_id: &str,
    ) -> Result<(), StorageError> {
        self.record(StoreCall::Abort {
            key: key.to_string(),
            upload_id: upload_id.to_string(),
        });
        Ok(())
    }

    fn sign_url(&self, key: &str, expire_secs: u64) -> String {
        self.record(StoreCall::Sign {
            key: key.to_string(),
            expire_secs,
        });
        let scheme = if self.sign_scheme_http {
            "http"
        } else {
            "https"
        };
        format!(
            "{}://demo-bucket.oss-cn-hangzhou.aliyuncs.com/{}?Expires=9999&OSSAccessKeyId=ak&Signature=sig",
            scheme, key
        )
    }
}

/// 确定性编码器：固定 16 字节输出，可注入指定帧的失败
#[derive(Default)]
pub struct FakeEncoder {
    /// 第 N 帧编码失败（0 起始）
    pub fail_at: Option<usize>,
    pub count: AtomicUsize,
}

impl FakeEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameEncoder for FakeEncoder {
    fn encode_frame(
        &self,
        _frame: &Frame,
        _format: ImageFormat,
        _quality: u8,
    ) -> Result<Bytes, CodecError> {
        let index = self.count.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(index) {
            return Err(CodecError::InvalidFrame("模拟编码失败".to_string()));
        }
        Ok(Bytes::from(vec![0u8; 16]))
    }
}

/// 固定大小的视频句柄
pub struct FakeVideo {
    pub size: usize,
}

impl Video for FakeVideo {
    fn save_to(&self, _container: VideoContainer, _codec: VideoCodec) -> Result<Bytes, CodecError> {
        Ok(Bytes::from(vec![0u8; self.size]))
    }
}

/// 编码必然失败的视频句柄
pub struct BrokenVideo;

impl Video for BrokenVideo {
    fn save_to(&self, _container: VideoContainer, _codec: VideoCodec) -> Result<Bytes, CodecError> {
        Err(CodecError::Video("模拟视频编码失败".to_string()))
    }
}

/// 顺序递增的确定性标记来源：00000000、00000001、……
#[derive(Default)]
pub struct SeqTokens(AtomicUsize);

impl SeqTokens {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenSource for SeqTokens {
    fn next_token(&self) -> String {
        format!("{:08x}", self.0.fetch_add(1, Ordering::SeqCst))
    }
}

pub fn credentials() -> Credentials {
    Credentials {
        access_key_id: "ak".to_string(),
        access_key_secret: "sk".to_string(),
        bucket: "demo-bucket".to_string(),
        endpoint: "oss-cn-hangzhou.aliyuncs.com".to_string(),
    }
}

pub fn frames(count: usize) -> Vec<Frame> {
    (0..count)
        .map(|_| Frame::new(2, 2, vec![64u8; 12]).unwrap())
        .collect()
}
