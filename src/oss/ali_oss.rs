// API 文档参考：
// aliyun-oss-rust-sdk crate: https://docs.rs/aliyun-oss-rust-sdk
// 阿里云 OSS 分片上传 API: https://help.aliyun.com/zh/oss/developer-reference/multipart-upload

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

use aliyun_oss_rust_sdk::oss::{API, OSS};
use aliyun_oss_rust_sdk::request::{RequestBuilder, RequestType};
use aliyun_oss_rust_sdk::url::UrlApi;

use crate::oss::{Credentials, ObjectStorage, PartInfo, PutOptions, StorageError};

/// 阿里云 OSS 客户端
///
/// 简单上传与签名 URL 走 SDK；分片上传 API SDK 未覆盖，按照
/// OSS 协议用 SDK 的请求签名加 reqwest 直接调用。
pub struct AliOssClient {
    client: OSS,
    bucket: String,
    endpoint: String,
    http: reqwest::Client,
}

impl AliOssClient {
    pub fn new(creds: &Credentials) -> Self {
        let client = OSS::new(
            creds.access_key_id.clone(),
            creds.access_key_secret.clone(),
            creds.endpoint.clone(),
            creds.bucket.clone(),
        );
        Self {
            client,
            bucket: creds.bucket.clone(),
            endpoint: creds.endpoint.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// 请求 URL：键按路径段 urlencode，子资源查询串原样拼接
    fn object_url(&self, key: &str, sub: &str) -> String {
        format!(
            "https://{}.{}/{}{}",
            self.bucket,
            self.endpoint,
            self.client.key_urlencode(key),
            sub
        )
    }

    /// 生成带签名的请求头；resource 形如 `/{key}?uploads`，
    /// 子资源必须进入签名资源串
    fn signed_headers(
        &self,
        resource: &str,
        builder: RequestBuilder,
    ) -> Result<reqwest::header::HeaderMap, StorageError> {
        let (_host, headers) = self
            .client
            .build_request(resource, builder)
            .map_err(|e| StorageError::Configuration(format!("构造签名请求失败: {}", e)))?;
        Ok(headers)
    }

    async fn response_message(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        format!("HTTP {}: {}", status, body)
    }
}

#[async_trait]
impl ObjectStorage for AliOssClient {
    // 上传内存文件 API (异步): https://docs.rs/aliyun-oss-rust-sdk/aliyun_oss_rust_sdk/oss/struct.OSS.html#method.pub_object_from_buffer
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        options: PutOptions,
    ) -> Result<(), StorageError> {
        let mut builder = RequestBuilder::new();

        if let Some(ct) = &options.content_type {
            builder = builder.with_content_type(ct);
        }

        // 自定义元数据 (x-oss-meta-*)
        if let Some(metadata) = &options.metadata {
            for (k, v) in metadata {
                builder = builder.oss_header_put(format!("x-oss-meta-{}", k).as_str(), v.as_str());
            }
        }

        self.client
            .pub_object_from_buffer(key, data.as_ref(), builder)
            .await
            .map_err(|e| StorageError::provider("put_object", e))?;

        Ok(())
    }

    async fn init_multipart_upload(
        &self,
        key: &str,
        options: PutOptions,
    ) -> Result<String, StorageError> {
        let mut builder = RequestBuilder::new();
        builder.method = RequestType::Post;
        if let Some(ct) = &options.content_type {
            builder = builder.with_content_type(ct);
        }

        let resource = format!("/{}?uploads", key);
        let headers = self.signed_headers(&resource, builder)?;

        let response = self
            .http
            .post(self.object_url(key, "?uploads"))
            .headers(headers)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::Multipart(
                Self::response_message(response).await,
            ));
        }

        let xml = response.text().await?;

        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "PascalCase")]
        struct InitiateMultipartUploadResult {
            upload_id: String,
        }

        let result: InitiateMultipartUploadResult = quick_xml::de::from_str(&xml)
            .map_err(|e| StorageError::Multipart(format!("解析 InitiateMultipartUpload 响应失败: {}", e)))?;

        Ok(result.upload_id)
    }

    async fn upload_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: u32,
        data: Bytes,
    ) -> Result<PartInfo, StorageError> {
        let mut builder = RequestBuilder::new();
        builder.method = RequestType::Put;

        let size = data.len() as u64;
        let resource = format!("/{}?partNumber={}&uploadId={}", key, part_number, upload_id);
        let headers = self.signed_headers(&resource, builder)?;

        let sub = format!(
            "?partNumber={}&uploadId={}",
            part_number,
            urlencoding::encode(upload_id)
        );
        let response = self
            .http
            .put(self.object_url(key, &sub))
            .headers(headers)
            .body(data.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::Multipart(
                Self::response_message(response).await,
            ));
        }

        // OSS 返回的 ETag 带引号，去掉后保存
        let etag = response
            .headers()
            .get("ETag")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim_matches('"').to_string())
            .ok_or_else(|| StorageError::Multipart("响应缺少 ETag".to_string()))?;

        Ok(PartInfo {
            part_number,
            etag,
            size,
        })
    }

    async fn complete_multipart_upload(
        &self,
        key: &str,
        upload_id: &str,
        parts: Vec<PartInfo>,
    ) -> Result<(), StorageError> {
        let mut body = String::from("<CompleteMultipartUpload>");
        for part in &parts {
            body.push_str(&format!(
                "<Part><PartNumber>{}</PartNumber><ETag>\"{}\"</ETag></Part>",
                part.part_number, part.etag
            ));
        }
        body.push_str("</CompleteMultipartUpload>");

        let mut builder = RequestBuilder::new();
        builder.method = RequestType::Post;
        builder = builder.with_content_type("application/xml");

        let resource = format!("/{}?uploadId={}", key, upload_id);
        let headers = self.signed_headers(&resource, builder)?;

        let sub = format!("?uploadId={}", urlencoding::encode(upload_id));
        let response = self
            .http
            .post(self.object_url(key, &sub))
            .headers(headers)
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::Multipart(
                Self::response_message(response).await,
            ));
        }

        Ok(())
    }

    async fn abort_multipart_upload(
        &self,
        key: &str,
        upload_id: &str,
    ) -> Result<(), StorageError> {
        let mut builder = RequestBuilder::new();
        builder.method = RequestType::Delete;

        let resource = format!("/{}?uploadId={}", key, upload_id);
        let headers = self.signed_headers(&resource, builder)?;

        let sub = format!("?uploadId={}", urlencoding::encode(upload_id));
        let response = self
            .http
            .delete(self.object_url(key, &sub))
            .headers(headers)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::Multipart(
                Self::response_message(response).await,
            ));
        }

        Ok(())
    }

    // 签名下载 URL: https://docs.rs/aliyun-oss-rust-sdk/aliyun_oss_rust_sdk/url/trait.UrlApi.html
    fn sign_url(&self, key: &str, expire_secs: u64) -> String {
        let build = RequestBuilder::new().with_expire(expire_secs as i64);
        self.client.sign_download_url(key, &build)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AliOssClient {
        AliOssClient::new(&Credentials {
            access_key_id: "ak".to_string(),
            access_key_secret: "sk".to_string(),
            bucket: "demo-bucket".to_string(),
            endpoint: "oss-cn-hangzhou.aliyuncs.com".to_string(),
        })
    }

    #[test]
    fn test_object_url_encodes_segments() {
        let c = client();
        assert_eq!(
            c.object_url("video/a b.mp4", "?uploads"),
            "https://demo-bucket.oss-cn-hangzhou.aliyuncs.com/video/a%20b.mp4?uploads"
        );
    }

    #[test]
    fn test_sign_url_shape() {
        let c = client();
        let url = c.sign_url("video/demo.mp4", 3600);
        assert!(url.starts_with("https://demo-bucket.oss-cn-hangzhou.aliyuncs.com/"));
        assert!(url.contains("Expires="));
        assert!(url.contains("OSSAccessKeyId=ak"));
        assert!(url.contains("Signature="));
    }
}
