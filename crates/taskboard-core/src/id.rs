use uuid::Uuid;

/// Generate a unique, prefixed string ID, e.g. `task_67e5504410b1426f9247bb680e5fe0c8`.
///
/// IDs carry no ordering information; callers that need order keep it
/// explicitly (columns hold an ordered `task_ids` list).
pub fn uid(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_carries_prefix() {
        let id = uid("task");
        assert!(id.starts_with("task_"));
        let id = uid("col");
        assert!(id.starts_with("col_"));
    }

    #[test]
    fn test_uid_is_unique() {
        let a = uid("task");
        let b = uid("task");
        assert_ne!(a, b);
    }
}
