use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use markup5ever_rcdom::{RcDom, SerializableHandle};

use crate::error::DocnavResult;

use super::dom::fragment_root;

/// 序列化片段
///
/// 只输出片段根（`<body>`）的子节点，与 [`super::dom::fragment_to_dom`] 对应。
pub fn serialize_fragment(dom: &RcDom) -> DocnavResult<String> {
    let mut buf: Vec<u8> = Vec::new();

    let serializable: SerializableHandle = fragment_root(dom).into();
    serialize(
        &mut buf,
        &serializable,
        SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        },
    )?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}
