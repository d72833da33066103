mod image_upload;
mod image_upload_options;
mod registry;
mod schema;
mod video_upload;
mod video_upload_advanced;

pub use image_upload::ImageUploadNode;
pub use image_upload_options::ImageUploadOptionsNode;
pub use registry::{display_name_mappings, get_node, node_names};
pub use schema::{NodeSchema, ParamKind, ParamSpec};
pub use video_upload::VideoUploadNode;
pub use video_upload_advanced::VideoUploadAdvancedNode;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::codec::{Frame, Video};
use crate::upload::UploadError;

/// 节点输入的媒体载荷
#[derive(Clone)]
pub enum MediaInput {
    /// 图片批次，按帧顺序处理
    Images(Vec<Frame>),
    /// 单个视频句柄
    Video(Arc<dyn Video>),
}

/// 节点的命名输出值
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    Text(String),
    Int(i64),
}

/// 宿主可见的节点接口
///
/// 宿主以松散的 JSON 参数调用；validate 在执行前把参数解析为各
/// 变体自己的强类型配置并校验，execute 不向宿主抛错，失败以结果
/// 文案的形式出现在输出里。
#[async_trait]
pub trait Node: Send + Sync {
    /// 注册表键名
    fn name(&self) -> &'static str;

    /// 宿主 UI 显示名
    fn display_name(&self) -> &'static str;

    /// 输出节点：执行结果直接展示给用户
    fn is_output_node(&self) -> bool {
        true
    }

    /// 参数声明，供宿主渲染输入界面
    fn schema(&self) -> NodeSchema;

    /// 执行前校验；必须在任何编码与网络调用之前完成
    fn validate(&self, params: &Value) -> Result<(), UploadError>;

    /// 执行上传，返回与 schema().outputs 对应的输出序列
    async fn execute(&self, media: MediaInput, params: &Value) -> Vec<OutputValue>;
}

/// 把宿主参数解析为节点的强类型配置
pub(crate) fn from_params<T: serde::de::DeserializeOwned>(params: &Value) -> Result<T, UploadError> {
    serde_json::from_value(params.clone())
        .map_err(|e| UploadError::Validation(format!("参数解析失败: {}", e)))
}
