use thiserror::Error;

use crate::codec::CodecError;
use crate::oss::StorageError;

/// 上传流程错误
///
/// 校验错误在任何编码/网络调用前出现；图片批次里的编码与存储错误
/// 按条目捕获转为行内错误文案，视频则整体失败。
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("参数校验失败: {0}")]
    Validation(String),

    #[error("编码失败: {0}")]
    Encoding(#[from] CodecError),

    #[error("上传失败 {filename}: {source}")]
    Storage {
        filename: String,
        #[source]
        source: StorageError,
    },
}

impl UploadError {
    pub fn storage(filename: impl Into<String>, source: StorageError) -> Self {
        UploadError::Storage {
            filename: filename.into(),
            source,
        }
    }
}
