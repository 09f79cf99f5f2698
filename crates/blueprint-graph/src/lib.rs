// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! blueprint-graph: project description graph model.
//!
//! A project description graph is the in-memory form of a build/project
//! manifest: one root project node owning targets, a file/group hierarchy,
//! configuration lists, build phases, and cross-target dependencies. Nodes
//! are held in an arena ([`ObjectGraph`]) and relate to each other through
//! opaque [`ObjectId`] handles, never owning pointers, so cross-references
//! (dependency proxies, wrapped files) can form cycles without creating
//! ownership cycles.
//!
//! Every node carries a [`Reference`]: a temporary, process-local placeholder
//! at creation time, replaced by a permanent digest-derived [`GlobalId`]
//! before the graph is persisted. Permanent values are computed by the
//! `blueprint-refgen` crate; this crate only stores them.

mod graph;
mod object;
mod reference;

pub use graph::{ObjectGraph, ObjectId};
pub use object::{
    BuildConfiguration, BuildFile, BuildPhase, BuildPhaseKind, BuildRule, ConfigurationList,
    FileReference, Group, Object, Project, Target, TargetDependency, TargetProxy,
};
pub use reference::{GlobalId, Reference};
