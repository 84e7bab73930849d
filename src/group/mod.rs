//! Groups: sets of point-like elements that move as one rigid unit.
//!
//! A group holds member ids only. The elements themselves, and the registry
//! of groups, belong to the board; every operation that touches element
//! state receives the board's `ElementStore` explicitly.

mod create;
mod stack;

pub use create::{GROUP_EL_TYPE, GroupAttributes, create_group};
pub use stack::GroupStack;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::board::elements::{Attributes, Element, ElementStore};
use crate::error::{GroupError, Result};
use crate::types::Vec2;

/// What `Group::set_property` does when a member rejects the attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failing member. Members after it are not touched.
    #[default]
    Abort,
    /// Try every member and report all failures at the end.
    Collect,
}

/// Board-level group policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPolicy {
    /// Drop a group from the board registry once `ungroup` has emptied it.
    #[serde(default)]
    pub purge_empty_on_ungroup: bool,
    #[serde(default)]
    pub property_failure: FailurePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    members: BTreeSet<String>,
    /// Translation waiting to be applied by the next `update`.
    pub pending_offset: Vec2,
    /// Always [`GROUP_EL_TYPE`]; kept for hosts that introspect elements.
    pub el_type: &'static str,
    /// Seed ids as passed to [`create_group`].
    pub parents: Vec<String>,
}

impl Group {
    pub(crate) fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Group {
            id: id.into(),
            name: name.into(),
            members: BTreeSet::new(),
            pending_offset: Vec2::ZERO,
            el_type: GROUP_EL_TYPE,
            parents: Vec::new(),
        }
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    pub fn contains(&self, element_id: &str) -> bool {
        self.members.contains(element_id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Insert one element. Does not touch the element's group stack.
    ///
    /// Locked and non-point-like elements are ignored.
    pub fn add_point(&mut self, element: &Element) {
        if !element.is_groupable() {
            log::debug!("group `{}`: `{}` is not groupable", self.id, element.id);
            return;
        }
        self.members.insert(element.id.clone());
    }

    pub fn add_points<'a>(&mut self, elements: impl IntoIterator<Item = &'a Element>) {
        for element in elements {
            self.add_point(element);
        }
    }

    /// Union `other`'s members into this group. `other` and the members'
    /// stacks are left as they are.
    ///
    /// Each member goes through [`Group::add_point`], so members that have
    /// been locked since they joined `other`, or that the board no longer
    /// owns, are not carried over.
    pub fn add_group(&mut self, other: &Group, elements: &ElementStore) {
        log::debug!(
            "group `{}`: merging {} member(s) of `{}`",
            self.id,
            other.len(),
            other.id
        );
        self.add_points(other.members().filter_map(|id| elements.get(id)));
    }

    /// Detach this group from its members and empty it.
    ///
    /// A member only pops this group if it is the member's active group;
    /// memberships shadowed by a newer group stay on the member's stack.
    pub fn ungroup(&mut self, elements: &mut ElementStore) {
        for id in &self.members {
            let Some(el) = elements.get_mut(id) else {
                continue;
            };
            if !el.groups.pop_if_top(&self.id) {
                log::debug!(
                    "group `{}`: `{id}` stays shadowed under `{}`",
                    self.id,
                    el.groups.top().unwrap_or_default()
                );
            }
        }
        self.members.clear();
    }

    /// Apply `pending_offset` to every member except `origin`, then let each
    /// member recompute its derived state.
    ///
    /// The translation pass completes before any recompute runs, so a glider
    /// sees the already-moved positions of the other members. Members locked
    /// after they joined stay where they are. Members the board no longer
    /// owns are dropped.
    pub fn update(&mut self, origin: &str, elements: &mut ElementStore) -> &mut Self {
        let offset = self.pending_offset;
        for id in &self.members {
            if id == origin {
                continue;
            }
            match elements.get_mut(id) {
                Some(el) if el.fixed => {
                    log::trace!("group `{}`: `{id}` is fixed, not translating", self.id);
                }
                Some(el) => el.screen += offset,
                None => {}
            }
        }

        let group_id = &self.id;
        self.members.retain(|id| {
            if elements.recompute(id, true) {
                true
            } else {
                log::debug!("group `{group_id}`: pruning deleted member `{id}`");
                false
            }
        });
        self
    }

    /// Forward `attributes` to every member's `set_property`.
    pub fn set_property(
        &self,
        attributes: &Attributes,
        elements: &mut ElementStore,
        policy: FailurePolicy,
    ) -> Result<()> {
        let mut failures = Vec::new();
        for id in &self.members {
            let Some(el) = elements.get_mut(id) else {
                continue;
            };
            if let Err(source) = el.set_property(attributes) {
                match policy {
                    FailurePolicy::Abort => {
                        return Err(GroupError::Property {
                            element: id.clone(),
                            source,
                        });
                    }
                    FailurePolicy::Collect => failures.push((id.clone(), source)),
                }
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(GroupError::Properties(failures))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::board::elements::{Glider, Point, Shape, Text};
    use crate::error::PropertyError;
    use crate::types::CoordSystem;

    fn store(points: &[(&str, f64, f64)]) -> ElementStore {
        let mut store = ElementStore::new(CoordSystem::default());
        for &(id, x, y) in points {
            store.insert(Element::new(id, id, Vec2::new(x, y), Shape::Point(Point::default())));
        }
        store
    }

    fn group_of(store: &ElementStore, id: &str, members: &[&str]) -> Group {
        let mut g = Group::new(id, id);
        g.add_points(members.iter().filter_map(|m| store.get(m)));
        g
    }

    fn attrs(v: serde_json::Value) -> Attributes {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_add_point_is_idempotent() {
        let store = store(&[("A", 0.0, 0.0)]);
        let mut g = Group::new("g", "g");
        let a = store.get("A").unwrap();
        g.add_point(a);
        g.add_point(a);
        assert_eq!(g.len(), 1);
        assert!(a.groups.is_empty());
    }

    #[test]
    fn test_add_point_skips_locked_and_text() {
        let mut store = store(&[("A", 0.0, 0.0)]);
        store.get_mut("A").unwrap().fixed = true;
        store.insert(Element::new("T", "T", Vec2::ZERO, Shape::Text(Text::new("x"))));
        let mut g = Group::new("g", "g");
        g.add_points([store.get("A").unwrap(), store.get("T").unwrap()]);
        assert!(g.is_empty());
    }

    #[test]
    fn test_add_group_is_a_pure_union() {
        let store = store(&[("A", 0.0, 0.0), ("B", 0.0, 0.0), ("C", 0.0, 0.0)]);
        let g1 = group_of(&store, "g1", &["A", "B"]);
        let mut g2 = group_of(&store, "g2", &["B", "C"]);
        g2.add_group(&g1, &store);
        assert_eq!(g2.members().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(g1.len(), 2);
    }

    #[test]
    fn test_add_group_leaves_out_members_locked_since() {
        let mut store = store(&[("A", 0.0, 0.0), ("B", 0.0, 0.0), ("C", 0.0, 0.0)]);
        let g1 = group_of(&store, "g1", &["A", "B"]);
        store.get_mut("A").unwrap().fixed = true;
        store.remove("B");

        let mut g2 = group_of(&store, "g2", &["C"]);
        g2.add_group(&g1, &store);
        assert_eq!(g2.members().collect::<Vec<_>>(), vec!["C"]);
    }

    #[test]
    fn test_update_translates_everyone_but_origin() {
        let mut store = store(&[("A", 5.0, -5.0), ("B", 10.0, 10.0), ("C", 20.0, 0.0)]);
        let mut g = group_of(&store, "g", &["A", "B", "C"]);
        g.pending_offset = Vec2::new(5.0, -5.0);
        g.update("A", &mut store);
        assert_eq!(store.screen_of("A"), Some(Vec2::new(5.0, -5.0)));
        assert_eq!(store.screen_of("B"), Some(Vec2::new(15.0, 5.0)));
        assert_eq!(store.screen_of("C"), Some(Vec2::new(25.0, -5.0)));
    }

    #[test]
    fn test_update_does_not_translate_locked_members() {
        let mut store = store(&[("A", 0.0, 0.0), ("B", 1.0, 1.0), ("C", 2.0, 2.0)]);
        let mut g = group_of(&store, "g", &["A", "B", "C"]);
        store.get_mut("A").unwrap().fixed = true;
        g.pending_offset = Vec2::new(5.0, 5.0);
        g.update("B", &mut store);
        assert_eq!(store.screen_of("A"), Some(Vec2::new(0.0, 0.0)));
        assert_eq!(store.screen_of("C"), Some(Vec2::new(7.0, 7.0)));
    }

    #[test]
    fn test_zero_offset_update_leaves_positions() {
        let mut store = store(&[("A", 1.5, 2.5), ("B", -3.0, 4.0)]);
        let mut g = group_of(&store, "g", &["A", "B"]);
        g.update("A", &mut store).update("B", &mut store);
        assert_eq!(store.screen_of("A"), Some(Vec2::new(1.5, 2.5)));
        assert_eq!(store.screen_of("B"), Some(Vec2::new(-3.0, 4.0)));
    }

    #[test]
    fn test_update_prunes_deleted_members() {
        let mut store = store(&[("A", 0.0, 0.0), ("B", 1.0, 1.0)]);
        let mut g = group_of(&store, "g", &["A", "B"]);
        store.remove("B");
        g.pending_offset = Vec2::new(1.0, 0.0);
        g.update("A", &mut store);
        assert!(!g.contains("B"));
        assert_eq!(g.len(), 1);
        g.update("A", &mut store);
        assert_eq!(g.members().collect::<Vec<_>>(), vec!["A"]);
    }

    #[test]
    fn test_ungroup_pops_only_active_membership() {
        let mut store = store(&[("A", 0.0, 0.0), ("B", 0.0, 0.0)]);
        let mut g1 = group_of(&store, "g1", &["A", "B"]);
        for id in ["A", "B"] {
            store.get_mut(id).unwrap().groups.push("g1");
        }
        store.get_mut("B").unwrap().groups.push("g2");

        g1.ungroup(&mut store);

        assert!(g1.is_empty());
        assert!(store.get("A").unwrap().groups.is_empty());
        let b = &store.get("B").unwrap().groups;
        assert_eq!(b.iter().collect::<Vec<_>>(), vec!["g1", "g2"]);
    }

    #[test]
    fn test_set_property_reaches_every_member() {
        let mut store = store(&[("A", 0.0, 0.0), ("B", 0.0, 0.0)]);
        let g = group_of(&store, "g", &["A", "B"]);
        let result = g.set_property(&attrs(json!({"dim": true})), &mut store, FailurePolicy::Abort);
        assert_eq!(result, Ok(()));
        assert!(store.iter().all(|el| el.style.dim));
    }

    #[test]
    fn test_set_property_abort_stops_at_first_failure() {
        let mut store = store(&[("A", 0.0, 0.0), ("B", 0.0, 0.0)]);
        let g = group_of(&store, "g", &["A", "B"]);
        let result = g.set_property(
            &attrs(json!({"wobble": 1})),
            &mut store,
            FailurePolicy::Abort,
        );
        assert_eq!(
            result,
            Err(GroupError::Property {
                element: "A".into(),
                source: PropertyError::UnsupportedOption("wobble".into()),
            })
        );
    }

    /// Store of points `A` and `C` around a glider `B`, which rejects `face`.
    fn mixed_store() -> ElementStore {
        let mut store = store(&[("A", 0.0, 0.0), ("C", 2.0, 0.0)]);
        store.insert(Element::new("B", "B", Vec2::ZERO, Shape::Glider(Glider::new("s"))));
        store
    }

    #[test]
    fn test_set_property_abort_leaves_later_members_untouched() {
        let mut store = mixed_store();
        let g = group_of(&store, "g", &["A", "B", "C"]);
        let result = g.set_property(
            &attrs(json!({"face": "x", "dim": true})),
            &mut store,
            FailurePolicy::Abort,
        );
        assert_eq!(
            result,
            Err(GroupError::Property {
                element: "B".into(),
                source: PropertyError::UnsupportedOption("face".into()),
            })
        );
        assert!(store.get("A").unwrap().style.dim);
        assert!(!store.get("B").unwrap().style.dim);
        let c = store.get("C").unwrap();
        assert!(!c.style.dim);
        assert!(matches!(&c.shape, Shape::Point(p) if p.face == 'o'));
    }

    #[test]
    fn test_set_property_collect_styles_the_rest() {
        let mut store = mixed_store();
        let g = group_of(&store, "g", &["A", "B", "C"]);
        let result = g.set_property(
            &attrs(json!({"face": "x", "dim": true})),
            &mut store,
            FailurePolicy::Collect,
        );
        assert_eq!(
            result,
            Err(GroupError::Properties(vec![(
                "B".into(),
                PropertyError::UnsupportedOption("face".into())
            )]))
        );
        assert!(store.get("A").unwrap().style.dim);
        assert!(!store.get("B").unwrap().style.dim);
        assert!(store.get("C").unwrap().style.dim);
    }

    #[test]
    fn test_set_property_collect_reports_all_failures() {
        let mut store = store(&[("A", 0.0, 0.0), ("B", 0.0, 0.0)]);
        let g = group_of(&store, "g", &["A", "B"]);
        let result = g.set_property(
            &attrs(json!({"wobble": 1})),
            &mut store,
            FailurePolicy::Collect,
        );
        match result {
            Err(GroupError::Properties(failures)) => {
                let ids: Vec<_> = failures.iter().map(|(id, _)| id.as_str()).collect();
                assert_eq!(ids, vec!["A", "B"]);
            }
            other => panic!("expected collected failures, got {other:?}"),
        }
    }
}
