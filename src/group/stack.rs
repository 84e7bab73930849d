use serde::Serialize;

/// Ordered group memberships of one element, oldest first.
///
/// Only the last entry is active. Entries are pushed when the element joins
/// a group and popped only by that same group, so a shadowed membership
/// stays frozen until everything above it is gone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupStack {
    ids: Vec<String>,
}

impl GroupStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active group, if any.
    pub fn top(&self) -> Option<&str> {
        self.ids.last().map(String::as_str)
    }

    pub fn is_top(&self, group_id: &str) -> bool {
        self.top() == Some(group_id)
    }

    pub fn push(&mut self, group_id: impl Into<String>) {
        self.ids.push(group_id.into());
    }

    /// Pop the top entry only if it is `group_id`.
    pub fn pop_if_top(&mut self, group_id: &str) -> bool {
        if self.is_top(group_id) {
            self.ids.pop();
            true
        } else {
            false
        }
    }

    pub fn contains(&self, group_id: &str) -> bool {
        self.ids.iter().any(|id| id == group_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_is_most_recent() {
        let mut stack = GroupStack::new();
        assert_eq!(stack.top(), None);
        stack.push("g1");
        stack.push("g2");
        assert_eq!(stack.top(), Some("g2"));
        assert_eq!(stack.len(), 2);
        assert!(stack.contains("g1"));
    }

    #[test]
    fn test_pop_only_from_top() {
        let mut stack = GroupStack::new();
        stack.push("g1");
        stack.push("g2");
        assert!(!stack.pop_if_top("g1"));
        assert_eq!(stack.iter().collect::<Vec<_>>(), vec!["g1", "g2"]);
        assert!(stack.pop_if_top("g2"));
        assert!(stack.pop_if_top("g1"));
        assert!(stack.is_empty());
    }
}
