/// 永久访问 URL，无需网络调用
pub fn public_url(bucket: &str, endpoint: &str, key: &str) -> String {
    format!("https://{}.{}/{}", bucket, endpoint, key)
}

/// 签名 URL 统一为 https；内容不变，仅替换协议头
pub fn ensure_https(url: String) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url,
    }
}
