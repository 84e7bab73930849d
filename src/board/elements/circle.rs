use serde::{Deserialize, Serialize};

use crate::types::Vec2;

use super::ElementStore;

/// A circle around a center point, with a radius in screen units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: String,
    pub radius: f64,
}

impl Circle {
    pub fn center(&self, store: &ElementStore) -> Option<Vec2> {
        store.screen_of(&self.center)
    }

    /// Closest point on the circumference to `p`. A point sitting exactly on
    /// the center snaps to the rightmost point of the circle.
    pub fn project(&self, p: Vec2, store: &ElementStore) -> Option<Vec2> {
        let c = self.center(store)?;
        let d = p - c;
        let len = d.length();
        if len == 0.0 {
            return Some(c + Vec2::new(self.radius, 0.0));
        }
        Some(c + d.scale(self.radius / len))
    }
}
