use async_trait::async_trait;
use bytes::Bytes;

use crate::oss::{PartInfo, PutOptions, StorageError};

/// 对象存储客户端接口
///
/// 节点层只依赖该接口，测试用记录型假实现替换真实客户端。
/// 分片上传按 OSS 协议进行：init 返回会话 id，各分片携带 1 起始的
/// 序号上传并返回 ETag，complete 按升序提交 (序号, ETag) 列表。
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// 单次上传整个对象
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        options: PutOptions,
    ) -> Result<(), StorageError>;

    /// 初始化分片上传会话，返回 upload_id
    async fn init_multipart_upload(
        &self,
        key: &str,
        options: PutOptions,
    ) -> Result<String, StorageError>;

    /// 上传一个分片
    async fn upload_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: u32,
        data: Bytes,
    ) -> Result<PartInfo, StorageError>;

    /// 完成分片上传
    async fn complete_multipart_upload(
        &self,
        key: &str,
        upload_id: &str,
        parts: Vec<PartInfo>,
    ) -> Result<(), StorageError>;

    /// 中止分片上传，释放存储侧的会话
    async fn abort_multipart_upload(&self, key: &str, upload_id: &str)
        -> Result<(), StorageError>;

    /// 生成限时签名下载 URL（本地计算，无网络调用）
    fn sign_url(&self, key: &str, expire_secs: u64) -> String;
}
