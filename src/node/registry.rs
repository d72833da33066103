use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::node::{
    ImageUploadNode, ImageUploadOptionsNode, Node, VideoUploadAdvancedNode, VideoUploadNode,
};

/// 节点注册表
///
/// 宿主交互层唯一的字符串分发点：宿主按类型名查找节点实例，
/// 其余代码全部走强类型接口。
static NODES: Lazy<BTreeMap<&'static str, Arc<dyn Node>>> = Lazy::new(|| {
    let variants: [Arc<dyn Node>; 4] = [
        Arc::new(ImageUploadNode),
        Arc::new(ImageUploadOptionsNode),
        Arc::new(VideoUploadNode),
        Arc::new(VideoUploadAdvancedNode),
    ];
    variants.into_iter().map(|node| (node.name(), node)).collect()
});

/// 按类型名查找节点
pub fn get_node(name: &str) -> Option<Arc<dyn Node>> {
    NODES.get(name).cloned()
}

/// 所有注册的节点类型名
pub fn node_names() -> Vec<&'static str> {
    NODES.keys().copied().collect()
}

/// 类型名到宿主 UI 显示名的映射
pub fn display_name_mappings() -> BTreeMap<&'static str, &'static str> {
    NODES
        .iter()
        .map(|(name, node)| (*name, node.display_name()))
        .collect()
}
