use std::time::{Duration, Instant};

use bytes::Bytes;
use tracing::{info, warn};

use crate::oss::{ObjectStorage, PutOptions, StorageError};

/// 分片固定 10MB，最后一片可以更小
pub const PART_SIZE: usize = 10 * 1024 * 1024;

/// 单次上传的统计信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadStats {
    pub total_bytes: u64,
    pub elapsed: Duration,
    /// 分片数量；走单次上传时为 0
    pub parts: usize,
}

/// 按大小选择上传方式
///
/// 载荷不超过阈值（单位 MB）时单次 put；超过则按 10MB 分片顺序上传，
/// 分片序号从 1 开始，完成时按升序提交 ETag 列表。threshold_mb 为
/// None 时始终单次上传。任何分片失败都会先中止会话再返回错误，
/// 避免存储侧残留未完成的分片会话。
pub async fn put_with_strategy(
    store: &dyn ObjectStorage,
    key: &str,
    data: Bytes,
    options: PutOptions,
    threshold_mb: Option<u64>,
) -> Result<UploadStats, StorageError> {
    let total_bytes = data.len() as u64;
    let start = Instant::now();

    let use_multipart = match threshold_mb {
        Some(mb) => total_bytes > mb * 1024 * 1024,
        None => false,
    };

    if !use_multipart {
        store.put_object(key, data, options).await?;
        return Ok(UploadStats {
            total_bytes,
            elapsed: start.elapsed(),
            parts: 0,
        });
    }

    info!(
        key,
        size_mb = total_bytes as f64 / (1024.0 * 1024.0),
        "超过分片阈值，使用分片上传"
    );

    let upload_id = store.init_multipart_upload(key, options).await?;

    let mut parts = Vec::new();
    let mut offset = 0usize;
    let mut part_number = 1u32;
    while offset < data.len() {
        let end = (offset + PART_SIZE).min(data.len());
        let chunk = data.slice(offset..end);
        match store.upload_part(key, &upload_id, part_number, chunk).await {
            Ok(part) => parts.push(part),
            Err(e) => {
                abort_session(store, key, &upload_id).await;
                return Err(e);
            }
        }
        offset = end;
        part_number += 1;
    }

    if let Err(e) = store
        .complete_multipart_upload(key, &upload_id, parts.clone())
        .await
    {
        abort_session(store, key, &upload_id).await;
        return Err(e);
    }

    info!(key, parts = parts.len(), "分片上传完成");

    Ok(UploadStats {
        total_bytes,
        elapsed: start.elapsed(),
        parts: parts.len(),
    })
}

/// 中止分片会话；中止本身失败只记日志，调用方仍上报原始错误
async fn abort_session(store: &dyn ObjectStorage, key: &str, upload_id: &str) {
    if let Err(e) = store.abort_multipart_upload(key, upload_id).await {
        warn!(key, upload_id, error = %e, "中止分片上传失败");
    }
}
