use serde::{Deserialize, Serialize};

use crate::types::Vec2;

use super::{ElementStore, Shape};

/// A point constrained to slide along another element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glider {
    /// Id of the segment or circle the glider lives on.
    pub slide_on: SlideTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideTarget(pub String);

impl Glider {
    pub fn new(slide_on: impl Into<String>) -> Self {
        Glider {
            slide_on: SlideTarget(slide_on.into()),
        }
    }

    /// Where the glider at `screen` lands on its target.
    ///
    /// `None` when the target is gone or cannot carry a glider, in which
    /// case the glider keeps its raw position.
    pub fn project(&self, screen: Vec2, store: &ElementStore) -> Option<Vec2> {
        let target = store.get(&self.slide_on.0)?;
        match &target.shape {
            Shape::Segment(s) => s.project(screen, store),
            Shape::Circle(c) => c.project(screen, store),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::elements::{Circle, Element, Point, Segment};
    use crate::types::CoordSystem;

    fn store_with_segment() -> ElementStore {
        let mut store = ElementStore::new(CoordSystem::default());
        store.insert(Element::new("A", "A", Vec2::new(0.0, 0.0), Shape::Point(Point::default())));
        store.insert(Element::new("B", "B", Vec2::new(10.0, 0.0), Shape::Point(Point::default())));
        store.insert(Element::new(
            "s",
            "s",
            Vec2::ZERO,
            Shape::Segment(Segment {
                from: "A".into(),
                to: "B".into(),
            }),
        ));
        store
    }

    #[test]
    fn test_projects_onto_segment_interior() {
        let store = store_with_segment();
        let g = Glider::new("s");
        assert_eq!(g.project(Vec2::new(4.0, 3.0), &store), Some(Vec2::new(4.0, 0.0)));
    }

    #[test]
    fn test_projection_clamps_to_segment_ends() {
        let store = store_with_segment();
        let g = Glider::new("s");
        assert_eq!(g.project(Vec2::new(-5.0, 1.0), &store), Some(Vec2::new(0.0, 0.0)));
        assert_eq!(g.project(Vec2::new(15.0, -1.0), &store), Some(Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_projects_onto_circle() {
        let mut store = store_with_segment();
        store.insert(Element::new(
            "c",
            "c",
            Vec2::ZERO,
            Shape::Circle(Circle {
                center: "A".into(),
                radius: 2.0,
            }),
        ));
        let g = Glider::new("c");
        assert_eq!(g.project(Vec2::new(0.0, 8.0), &store), Some(Vec2::new(0.0, 2.0)));
    }

    #[test]
    fn test_missing_target_keeps_position() {
        let store = store_with_segment();
        let g = Glider::new("nope");
        assert_eq!(g.project(Vec2::new(1.0, 1.0), &store), None);
    }
}
