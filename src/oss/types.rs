use smart_default::SmartDefault;
use std::collections::HashMap;

use crate::oss::is_known_endpoint;

/// 访问凭证，每次调用由宿主参数传入，不做任何缓存
#[derive(Debug, Clone, SmartDefault)]
pub struct Credentials {
    pub access_key_id: String,
    pub access_key_secret: String,
    pub bucket: String,
    pub endpoint: String,
}

impl Credentials {
    /// 关键字段非空且端点在白名单内；必须在任何网络调用前执行
    pub fn validate(&self) -> Result<(), String> {
        if self.access_key_id.is_empty()
            || self.access_key_secret.is_empty()
            || self.bucket.is_empty()
            || self.endpoint.is_empty()
        {
            return Err("关键参数不能为空".to_string());
        }
        if !is_known_endpoint(&self.endpoint) {
            return Err(format!("endpoint 不正确: {}", self.endpoint));
        }
        Ok(())
    }
}

/// 上传选项
#[derive(Debug, Clone, SmartDefault)]
pub struct PutOptions {
    pub content_type: Option<String>,
    /// 自定义元数据（x-oss-meta-*）
    pub metadata: Option<HashMap<String, String>>,
}

impl PutOptions {
    pub fn with_content_type<S: Into<String>>(content_type: S) -> Self {
        Self {
            content_type: Some(content_type.into()),
            metadata: None,
        }
    }
}

/// 分片信息：完成分片上传时需要按 part_number 升序提交
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartInfo {
    pub part_number: u32,
    pub etag: String,
    pub size: u64,
}
