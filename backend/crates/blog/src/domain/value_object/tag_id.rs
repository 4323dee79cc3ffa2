use kernel::id::{Id, NodeType};

pub struct TagMarker;
pub type TagId = Id<TagMarker>;

impl NodeType for TagMarker {
    const TYPE_NAME: &'static str = "TagNode";
}
