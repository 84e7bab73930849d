//! Element types hosted on a board.
//!
//! Each element kind lives in its own module. `Element` wraps the shared
//! state (id, position, flags, group memberships) around a kind-specific
//! payload.

mod circle;
mod glider;
mod point;
mod property;
mod segment;
mod text;

pub use circle::Circle;
pub use glider::{Glider, SlideTarget};
pub use point::Point;
pub use property::Attributes;
pub use segment::Segment;
pub use text::Text;

use std::collections::HashMap;

use serde::Serialize;

use crate::error::PropertyError;
use crate::group::GroupStack;
use crate::types::{CoordSystem, Style, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Point,
    Glider,
    Segment,
    Circle,
    Text,
}

impl ElementKind {
    /// Free points and gliders are the only kinds that can join a group.
    pub fn is_point_like(self) -> bool {
        matches!(self, ElementKind::Point | ElementKind::Glider)
    }
}

#[derive(Debug, Clone)]
pub enum Shape {
    Point(Point),
    Glider(Glider),
    Segment(Segment),
    Circle(Circle),
    Text(Text),
}

#[derive(Debug, Clone)]
pub struct Element {
    pub id: String,
    pub name: String,
    /// Screen-space position. For segments and circles this is unused.
    pub screen: Vec2,
    /// User-space position, derived from `screen` on every update.
    pub user: Vec2,
    pub fixed: bool,
    pub visible: bool,
    pub style: Style,
    pub groups: GroupStack,
    pub shape: Shape,
}

impl Element {
    pub fn new(id: impl Into<String>, name: impl Into<String>, screen: Vec2, shape: Shape) -> Self {
        Element {
            id: id.into(),
            name: name.into(),
            screen,
            user: Vec2::ZERO,
            fixed: false,
            visible: true,
            style: Style::default(),
            groups: GroupStack::new(),
            shape,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self.shape {
            Shape::Point(_) => ElementKind::Point,
            Shape::Glider(_) => ElementKind::Glider,
            Shape::Segment(_) => ElementKind::Segment,
            Shape::Circle(_) => ElementKind::Circle,
            Shape::Text(_) => ElementKind::Text,
        }
    }

    /// Whether the element may be added to a group.
    pub fn is_groupable(&self) -> bool {
        !self.fixed && self.kind().is_point_like()
    }

    /// The id of the element's active group.
    pub fn active_group(&self) -> Option<&str> {
        self.groups.top()
    }

    pub fn set_property(&mut self, attributes: &Attributes) -> Result<(), PropertyError> {
        property::apply(self, attributes)
    }
}

/// Board-owned element arena keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: HashMap<String, Element>,
    coords: CoordSystem,
}

impl ElementStore {
    pub fn new(coords: CoordSystem) -> Self {
        ElementStore {
            elements: HashMap::new(),
            coords,
        }
    }

    pub fn coords(&self) -> &CoordSystem {
        &self.coords
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn insert(&mut self, element: Element) -> Option<Element> {
        self.elements.insert(element.id.clone(), element)
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    pub fn screen_of(&self, id: &str) -> Option<Vec2> {
        self.elements.get(id).map(|el| el.screen)
    }

    /// Recompute the derived state of one element.
    ///
    /// Gliders re-project onto their slide target, which reads the current
    /// screen positions of other elements. Returns `false` when the element
    /// does not exist.
    pub fn recompute(&mut self, id: &str, propagated: bool) -> bool {
        let Some(el) = self.elements.get(id) else {
            return false;
        };
        let snapped = match &el.shape {
            Shape::Glider(g) => g.project(el.screen, self),
            _ => None,
        };
        let coords = self.coords;
        let Some(el) = self.elements.get_mut(id) else {
            return false;
        };
        if let Some(screen) = snapped {
            el.screen = screen;
        }
        el.user = coords.to_user(el.screen);
        log::trace!(
            "recomputed `{id}` at ({:.2}, {:.2}){}",
            el.user.x,
            el.user.y,
            if propagated { " [propagated]" } else { "" }
        );
        true
    }
}
