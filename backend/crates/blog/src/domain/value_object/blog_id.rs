use kernel::id::{Id, NodeType};

pub struct BlogMarker;
pub type BlogId = Id<BlogMarker>;

impl NodeType for BlogMarker {
    const TYPE_NAME: &'static str = "BlogNode";
}
