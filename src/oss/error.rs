use thiserror::Error;

/// 对象存储错误
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("网络错误: {0}")]
    Network(#[from] reqwest::Error),

    #[error("OSS 请求失败 [{context}]: {message}")]
    Provider {
        context: &'static str,
        message: String,
    },

    #[error("分片上传失败: {0}")]
    Multipart(String),
}

impl StorageError {
    /// 从 SDK/HTTP 错误转换，保留出错的操作名
    pub fn provider<E: std::fmt::Display>(context: &'static str, err: E) -> Self {
        StorageError::Provider {
            context,
            message: err.to_string(),
        }
    }
}
