use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a process-unique, monotonically increasing node ID, rendered as
/// a stable opaque string. IDs survive clone (clone preserves the string,
/// it never reallocates).
pub fn alloc_node_id(prefix: &str) -> String {
    let n = NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = alloc_node_id("void");
        let b = alloc_node_id("void");
        assert_ne!(a, b);
    }
}
