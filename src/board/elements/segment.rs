use serde::{Deserialize, Serialize};

use crate::types::Vec2;

use super::ElementStore;

/// A straight segment between two points, referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: String,
    pub to: String,
}

impl Segment {
    /// Current screen-space endpoints, if both still exist.
    pub fn endpoints(&self, store: &ElementStore) -> Option<(Vec2, Vec2)> {
        Some((store.screen_of(&self.from)?, store.screen_of(&self.to)?))
    }

    /// Closest point on the segment to `p`.
    pub fn project(&self, p: Vec2, store: &ElementStore) -> Option<Vec2> {
        let (a, b) = self.endpoints(store)?;
        let ab = b - a;
        let len_sq = ab.dot(ab);
        if len_sq == 0.0 {
            return Some(a);
        }
        let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
        Some(a + ab.scale(t))
    }
}
