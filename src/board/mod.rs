//! Board — the host scene.
//!
//! Owns every element and every group, hands out ids and names, and drives
//! the drag protocol: move the dragged element, store the delta on its
//! active group, let the group carry the rest of its members along.

pub mod elements;
pub mod source;

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{GroupError, Result};
use crate::group::{Group, GroupPolicy};
use crate::types::{CoordSystem, Vec2};
use elements::{Attributes, Circle, Element, ElementKind, ElementStore, Glider, Point, Segment, Shape, Text};

pub struct Board {
    pub id: String,
    elements: ElementStore,
    groups: HashMap<String, Group>,
    /// Bumped for every element and every group construction attempt.
    num_objects: usize,
    policy: GroupPolicy,
}

impl Board {
    pub fn new(id: impl Into<String>, coords: CoordSystem) -> Self {
        Board {
            id: id.into(),
            elements: ElementStore::new(coords),
            groups: HashMap::new(),
            num_objects: 0,
            policy: GroupPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: GroupPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> GroupPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: GroupPolicy) {
        self.policy = policy;
    }

    pub fn coords(&self) -> &CoordSystem {
        self.elements.coords()
    }

    fn next_object_number(&mut self) -> usize {
        let n = self.num_objects;
        self.num_objects += 1;
        n
    }

    // -- Names --

    fn name_taken(&self, name: &str) -> bool {
        self.elements.iter().any(|el| el.name == name)
            || self.groups.values().any(|g| g.name == name)
    }

    /// Next free label in the sequence A, B, …, Z, AA, AB, …
    pub fn generate_name(&self) -> String {
        (0..)
            .map(letters)
            .find(|candidate| {
                !self.name_taken(candidate) && !self.name_taken(&format!("group_{candidate}"))
            })
            .unwrap_or_default()
    }

    // -- Elements --

    /// Add an element. A missing or empty id becomes `<board>E<n>`, a missing
    /// name comes from [`Board::generate_name`].
    pub fn add_element(
        &mut self,
        id: Option<&str>,
        name: Option<&str>,
        screen: Vec2,
        shape: Shape,
    ) -> Result<String> {
        let number = self.next_object_number();
        let id = match id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("{}E{number}", self.id),
        };
        if self.elements.contains(&id) {
            return Err(GroupError::DuplicateElement(id));
        }
        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.generate_name(),
        };
        self.elements.insert(Element::new(id.clone(), name, screen, shape));
        self.elements.recompute(&id, false);
        Ok(id)
    }

    pub fn add_point(&mut self, id: Option<&str>, name: Option<&str>, screen: Vec2) -> Result<String> {
        self.add_element(id, name, screen, Shape::Point(Point::default()))
    }

    /// Add a glider on the segment or circle `slide_on`; it snaps onto it
    /// immediately.
    pub fn add_glider(
        &mut self,
        id: Option<&str>,
        name: Option<&str>,
        screen: Vec2,
        slide_on: &str,
    ) -> Result<String> {
        self.require(slide_on)?;
        self.add_element(id, name, screen, Shape::Glider(Glider::new(slide_on)))
    }

    pub fn add_segment(&mut self, id: Option<&str>, name: Option<&str>, from: &str, to: &str) -> Result<String> {
        self.require(from)?;
        self.require(to)?;
        let shape = Shape::Segment(Segment {
            from: from.to_string(),
            to: to.to_string(),
        });
        self.add_element(id, name, Vec2::ZERO, shape)
    }

    pub fn add_circle(&mut self, id: Option<&str>, name: Option<&str>, center: &str, radius: f64) -> Result<String> {
        self.require(center)?;
        let shape = Shape::Circle(Circle {
            center: center.to_string(),
            radius,
        });
        self.add_element(id, name, Vec2::ZERO, shape)
    }

    pub fn add_text(&mut self, id: Option<&str>, screen: Vec2, text: &str) -> Result<String> {
        self.add_element(id, None, screen, Shape::Text(Text::new(text)))
    }

    fn require(&self, id: &str) -> Result<()> {
        if self.elements.contains(id) {
            Ok(())
        } else {
            Err(GroupError::UnknownElement(id.to_string()))
        }
    }

    /// Remove an element from the board. Groups notice on their next update.
    pub fn remove_element(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    pub fn owns(&self, id: &str) -> bool {
        self.elements.contains(id)
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn elements(&self) -> &ElementStore {
        &self.elements
    }

    // -- Groups --

    /// Build and register a group from `seeds`.
    ///
    /// Unknown, locked and non-point-like seeds are skipped. A seed that
    /// already has an active group brings that group's whole membership
    /// along. Every resulting member gets the new group pushed on its stack.
    pub fn create_group<I>(&mut self, id: Option<&str>, name: Option<&str>, seeds: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let number = self.next_object_number();
        let id = match id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("{}Group{number}", self.id),
        };
        if self.groups.contains_key(&id) {
            return Err(GroupError::DuplicateId(id));
        }
        self.groups.insert(id.clone(), Group::new(id.clone(), String::new()));

        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("group_{}", self.generate_name()),
        };
        let mut group = Group::new(id.clone(), name);

        for seed in seeds {
            let seed = seed.as_ref();
            let Some(el) = self.elements.get(seed) else {
                log::debug!("group `{id}`: unknown seed `{seed}`");
                continue;
            };
            if !el.is_groupable() {
                log::debug!("group `{id}`: seed `{seed}` is locked or not point-like");
                continue;
            }
            match el.active_group().and_then(|active| self.groups.get(active)) {
                Some(active) => group.add_group(active, &self.elements),
                None => group.add_point(el),
            }
        }

        for member in group.members() {
            if let Some(el) = self.elements.get_mut(member) {
                el.groups.push(id.as_str());
            }
        }
        log::debug!("created group `{id}` ({}) with {} member(s)", group.name, group.len());
        self.groups.insert(id.clone(), group);
        Ok(id)
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.get(id)
    }

    pub fn group_mut(&mut self, id: &str) -> Option<&mut Group> {
        self.groups.get_mut(id)
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// The group that drags `element_id` along, if any.
    pub fn active_group(&self, element_id: &str) -> Option<&Group> {
        let top = self.elements.get(element_id)?.active_group()?;
        self.groups.get(top)
    }

    /// Ungroup `group_id`. With `purge_empty_on_ungroup` the emptied group
    /// is also dropped from the registry.
    pub fn ungroup(&mut self, group_id: &str) -> Result<()> {
        let group = self
            .groups
            .get_mut(group_id)
            .ok_or_else(|| GroupError::UnknownGroup(group_id.to_string()))?;
        group.ungroup(&mut self.elements);
        log::debug!("ungrouped `{group_id}`");
        if self.policy.purge_empty_on_ungroup {
            self.groups.remove(group_id);
            log::debug!("purged `{group_id}` from registry");
        }
        Ok(())
    }

    /// Broadcast `attributes` to the members of `group_id` under the board's
    /// failure policy.
    pub fn set_group_property(&mut self, group_id: &str, attributes: &Attributes) -> Result<()> {
        let group = self
            .groups
            .get(group_id)
            .ok_or_else(|| GroupError::UnknownGroup(group_id.to_string()))?;
        group.set_property(attributes, &mut self.elements, self.policy.property_failure)
    }

    /// Run one update cycle of `group_id` with `origin` as the moved member.
    pub fn update_group(&mut self, group_id: &str, origin: &str) -> Result<()> {
        let group = self
            .groups
            .get_mut(group_id)
            .ok_or_else(|| GroupError::UnknownGroup(group_id.to_string()))?;
        group.update(origin, &mut self.elements);
        Ok(())
    }

    // -- Updates & dragging --

    /// Recompute an element.
    ///
    /// A primary update (`propagated == false`) of a grouped element also
    /// runs its active group when that group has a pending offset. Updates
    /// issued by a group are propagated and never re-enter a group.
    pub fn update_element(&mut self, id: &str, propagated: bool) -> Result<()> {
        if !self.elements.recompute(id, propagated) {
            return Err(GroupError::UnknownElement(id.to_string()));
        }
        if propagated {
            return Ok(());
        }
        let Some(active) = self.elements.get(id).and_then(|el| el.active_group()) else {
            return Ok(());
        };
        if let Some(group) = self.groups.get_mut(active) {
            if !group.pending_offset.is_zero() {
                group.update(id, &mut self.elements);
            }
        }
        Ok(())
    }

    /// Host drag handler: move `id` by `delta` in screen space and carry its
    /// active group along. Fixed elements do not move.
    pub fn drag(&mut self, id: &str, delta: Vec2) -> Result<()> {
        let el = self
            .elements
            .get_mut(id)
            .ok_or_else(|| GroupError::UnknownElement(id.to_string()))?;
        if el.fixed {
            log::debug!("`{id}` is fixed, ignoring drag");
            return Ok(());
        }
        el.screen += delta;
        let active = el.active_group().map(str::to_string);

        if let Some(group) = active.as_deref().and_then(|g| self.groups.get_mut(g)) {
            group.pending_offset = delta;
        }
        let result = self.update_element(id, false);
        if let Some(group) = active.as_deref().and_then(|g| self.groups.get_mut(g)) {
            group.pending_offset = Vec2::ZERO;
        }
        result
    }

    // -- Introspection --

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut elements: Vec<_> = self
            .elements
            .iter()
            .map(|el| ElementSnapshot {
                id: el.id.clone(),
                name: el.name.clone(),
                kind: el.kind(),
                screen: el.screen,
                user: el.user,
                fixed: el.fixed,
                groups: el.groups.iter().map(str::to_string).collect(),
            })
            .collect();
        elements.sort_by(|a, b| a.id.cmp(&b.id));

        let mut groups: Vec<_> = self
            .groups
            .values()
            .map(|g| GroupSnapshot {
                id: g.id.clone(),
                name: g.name.clone(),
                members: g.members().map(str::to_string).collect(),
            })
            .collect();
        groups.sort_by(|a, b| a.id.cmp(&b.id));

        BoardSnapshot { elements, groups }
    }
}

/// 0 → A, 25 → Z, 26 → AA, …
fn letters(mut n: usize) -> String {
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    pub elements: Vec<ElementSnapshot>,
    pub groups: Vec<GroupSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ElementSnapshot {
    pub id: String,
    pub name: String,
    pub kind: ElementKind,
    pub screen: Vec2,
    pub user: Vec2,
    pub fixed: bool,
    /// Group stack, oldest first.
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupSnapshot {
    pub id: String,
    pub name: String,
    pub members: Vec<String>,
}
