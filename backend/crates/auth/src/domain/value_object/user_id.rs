use kernel::id::{Id, NodeType};

pub struct UserMarker;
pub type UserId = Id<UserMarker>;

impl NodeType for UserMarker {
    const TYPE_NAME: &'static str = "UserNode";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_global_id() {
        let user_id = UserId::from_i64(7);
        let global = user_id.to_global_id();
        assert_eq!(UserId::from_global_id(&global).unwrap(), user_id);
    }

    #[test]
    fn test_user_id_rejects_other_types() {
        let global = kernel::global_id::encode("BlogNode", 7);
        let err = UserId::from_global_id(&global).unwrap_err();
        assert_eq!(err.to_string(), "Must receive a UserNode id");
    }
}
