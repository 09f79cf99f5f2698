// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Arena store owning every node of one project description graph.

use std::collections::BTreeMap;

use crate::object::{
    BuildConfiguration, BuildFile, BuildPhase, BuildRule, ConfigurationList, FileReference, Group,
    Object, Project, Target, TargetDependency, TargetProxy,
};
use crate::reference::{GlobalId, Reference};

/// Opaque arena handle to a node.
///
/// Handles are process-local and never persisted; the persistable identity
/// of a node is its [`Reference`]. A handle may dangle after the node it
/// named is removed, and every lookup returns `Option` accordingly.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(u64);

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct ObjectSlot {
    reference: Reference,
    object: Object,
}

/// Owns all nodes of one graph and resolves handle lookups.
///
/// Nodes are keyed by [`ObjectId`] in a `BTreeMap` so that iteration order is
/// deterministic. Inserting a node assigns it a fresh `Temporary` reference
/// from a monotonic counter; the counter value carries no meaning beyond
/// process-local uniqueness and never influences permanent identifiers.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectGraph {
    objects: BTreeMap<ObjectId, ObjectSlot>,
    next_id: u64,
    root_project: Option<ObjectId>,
}

impl ObjectGraph {
    /// Creates an empty graph with no declared root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, assigning it a fresh handle and a `Temporary` reference.
    pub fn insert(&mut self, object: Object) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(
            id,
            ObjectSlot {
                reference: Reference::Temporary(id.0),
                object,
            },
        );
        id
    }

    /// Removes a node, returning its payload when it existed.
    ///
    /// Relations held by other nodes are not rewritten; handles naming the
    /// removed node dangle from this point on.
    pub fn remove(&mut self, id: ObjectId) -> Option<Object> {
        self.objects.remove(&id).map(|slot| slot.object)
    }

    /// Declares the graph's root project reference.
    ///
    /// The handle is not validated here; a declared root that no longer
    /// resolves is surfaced by consumers at traversal time.
    pub fn set_root_project(&mut self, id: ObjectId) {
        self.root_project = Some(id);
    }

    /// Returns the declared root project handle, if any.
    #[must_use]
    pub fn root_project(&self) -> Option<ObjectId> {
        self.root_project
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` when the graph holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterates over `(handle, reference, node)` in deterministic order.
    pub fn iter_objects(&self) -> impl Iterator<Item = (ObjectId, &Reference, &Object)> {
        self.objects
            .iter()
            .map(|(id, slot)| (*id, &slot.reference, &slot.object))
    }

    /// Resolves a handle to its node.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id).map(|slot| &slot.object)
    }

    /// Resolves a handle to its node, mutably.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(&id).map(|slot| &mut slot.object)
    }

    /// Returns the node's identity cell.
    #[must_use]
    pub fn reference(&self, id: ObjectId) -> Option<&Reference> {
        self.objects.get(&id).map(|slot| &slot.reference)
    }

    /// Returns `true` when the node exists and still holds a placeholder.
    #[must_use]
    pub fn is_temporary(&self, id: ObjectId) -> bool {
        self.reference(id).is_some_and(Reference::is_temporary)
    }

    /// Returns the node's permanent value when one has been fixed.
    #[must_use]
    pub fn permanent(&self, id: ObjectId) -> Option<&GlobalId> {
        self.reference(id).and_then(Reference::permanent)
    }

    /// Fixes the node's reference to `value`.
    ///
    /// Returns `true` when the node exists and transitioned from `Temporary`;
    /// `false` when the handle dangles or the reference was already fixed
    /// (in which case its stored value is untouched).
    pub fn fix_reference(&mut self, id: ObjectId, value: GlobalId) -> bool {
        self.objects
            .get_mut(&id)
            .is_some_and(|slot| slot.reference.fix(value))
    }

    /// Resolves a handle to a project node.
    #[must_use]
    pub fn project(&self, id: ObjectId) -> Option<&Project> {
        self.object(id).and_then(Object::as_project)
    }

    /// Resolves a handle to a target node.
    #[must_use]
    pub fn target(&self, id: ObjectId) -> Option<&Target> {
        self.object(id).and_then(Object::as_target)
    }

    /// Resolves a handle to a group node.
    #[must_use]
    pub fn group(&self, id: ObjectId) -> Option<&Group> {
        self.object(id).and_then(Object::as_group)
    }

    /// Resolves a handle to a file reference node.
    #[must_use]
    pub fn file_reference(&self, id: ObjectId) -> Option<&FileReference> {
        self.object(id).and_then(Object::as_file_reference)
    }

    /// Resolves a handle to a configuration list node.
    #[must_use]
    pub fn configuration_list(&self, id: ObjectId) -> Option<&ConfigurationList> {
        self.object(id).and_then(Object::as_configuration_list)
    }

    /// Resolves a handle to a build configuration node.
    #[must_use]
    pub fn build_configuration(&self, id: ObjectId) -> Option<&BuildConfiguration> {
        self.object(id).and_then(Object::as_build_configuration)
    }

    /// Resolves a handle to a build phase node.
    #[must_use]
    pub fn build_phase(&self, id: ObjectId) -> Option<&BuildPhase> {
        self.object(id).and_then(Object::as_build_phase)
    }

    /// Resolves a handle to a build file node.
    #[must_use]
    pub fn build_file(&self, id: ObjectId) -> Option<&BuildFile> {
        self.object(id).and_then(Object::as_build_file)
    }

    /// Resolves a handle to a build rule node.
    #[must_use]
    pub fn build_rule(&self, id: ObjectId) -> Option<&BuildRule> {
        self.object(id).and_then(Object::as_build_rule)
    }

    /// Resolves a handle to a target dependency node.
    #[must_use]
    pub fn target_dependency(&self, id: ObjectId) -> Option<&TargetDependency> {
        self.object(id).and_then(Object::as_target_dependency)
    }

    /// Resolves a handle to a target proxy node.
    #[must_use]
    pub fn target_proxy(&self, id: ObjectId) -> Option<&TargetProxy> {
        self.object(id).and_then(Object::as_target_proxy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_assigns_distinct_temporary_references() {
        let mut graph = ObjectGraph::new();
        let a = graph.insert(Object::Group(Group::default()));
        let b = graph.insert(Object::Group(Group::default()));
        assert_ne!(a, b);
        assert!(graph.is_temporary(a));
        assert!(graph.is_temporary(b));
        assert_ne!(graph.reference(a), graph.reference(b));
    }

    #[test]
    fn fix_reference_is_one_way_per_node() {
        let mut graph = ObjectGraph::new();
        let id = graph.insert(Object::BuildRule(BuildRule::default()));
        assert!(graph.fix_reference(id, GlobalId::new("AB".into())));
        assert!(!graph.fix_reference(id, GlobalId::new("CD".into())));
        assert_eq!(graph.permanent(id).map(GlobalId::as_str), Some("AB"));
    }

    #[test]
    fn removed_handles_dangle() {
        let mut graph = ObjectGraph::new();
        let id = graph.insert(Object::FileReference(FileReference::default()));
        assert!(graph.remove(id).is_some());
        assert!(graph.object(id).is_none());
        assert!(graph.reference(id).is_none());
        assert!(!graph.fix_reference(id, GlobalId::new("EF".into())));
    }

    #[test]
    fn typed_lookup_rejects_kind_mismatch() {
        let mut graph = ObjectGraph::new();
        let id = graph.insert(Object::Target(Target {
            name: "App".into(),
            ..Target::default()
        }));
        assert!(graph.target(id).is_some());
        assert!(graph.project(id).is_none());
        assert!(graph.group(id).is_none());
    }
}
