use chrono::Local;
use rand::Rng;

/// 短随机标记来源
///
/// 对象键里的 8 位标记用于避免同一秒内的键冲突；生产实现每次取随机
/// 值，测试替换为确定性序列。
pub trait TokenSource: Send + Sync {
    /// 返回 8 个十六进制字符
    fn next_token(&self) -> String;
}

/// 默认实现：8 位随机十六进制
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenSource;

impl TokenSource for RandomTokenSource {
    fn next_token(&self) -> String {
        format!("{:08x}", rand::thread_rng().gen::<u32>())
    }
}

/// 规范化目录前缀：空串保持为空，否则去掉开头的 /、保证以一个 / 结尾。
/// 幂等：对已规范化的输入原样返回。
pub fn normalize_folder(folder: &str) -> String {
    let trimmed = folder.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let inner = trimmed.trim_start_matches('/').trim_end_matches('/');
    if inner.is_empty() {
        return String::new();
    }
    format!("{}/", inner)
}

/// 本地时间戳段，精确到秒
pub fn generate_timestamp() -> String {
    Local::now().format("%Y%m%d%H%M%S").to_string()
}

/// 图片对象键：`{folder}{prefix}_{timestamp}_{index}_{token}.{ext}`
///
/// timestamp 为空时保留两个相邻下划线，index 是批次内的 0 起始序号。
/// folder 必须已经过 normalize_folder。
pub fn image_key(
    folder: &str,
    prefix: &str,
    timestamp: &str,
    index: usize,
    token: &str,
    ext: &str,
) -> String {
    format!(
        "{}{}_{}_{}_{}.{}",
        folder, prefix, timestamp, index, token, ext
    )
}

/// 视频对象键
///
/// 自定义文件名优先（缺 .mp4 后缀时补上），否则
/// `{folder}{prefix}_{timestamp?}_{token}.mp4`，无序号段。
pub fn video_key(
    folder: &str,
    prefix: &str,
    timestamp: Option<&str>,
    token: &str,
    custom_filename: Option<&str>,
) -> String {
    if let Some(custom) = custom_filename {
        let base = custom.trim();
        if !base.is_empty() {
            return if base.ends_with(".mp4") {
                format!("{}{}", folder, base)
            } else {
                format!("{}{}.mp4", folder, base)
            };
        }
    }
    match timestamp {
        Some(ts) => format!("{}{}_{}_{}.mp4", folder, prefix, ts, token),
        None => format!("{}{}_{}.mp4", folder, prefix, token),
    }
}
