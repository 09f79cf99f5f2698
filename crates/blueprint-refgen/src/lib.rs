// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! blueprint-refgen: deterministic permanent-reference generation.
//!
//! Before a project description graph is persisted, every node's temporary
//! placeholder reference must be replaced by a permanent identifier computed
//! purely from the node's type, its name (when it has one), and the chain of
//! ancestor discriminators leading to it. Two runs over structurally
//! identical input produce byte-identical identifiers, so re-generating a
//! graph without semantic change yields no diff under version control.
//!
//! The crate exposes two pieces:
//!
//! - [`compose`] — the pure identifier composer: ordered seed chain in,
//!   canonical digest out.
//! - [`generate`] — the traversal that visits the graph in dependency order
//!   and fixes each still-temporary reference exactly once. Nodes whose
//!   identity borrows from other nodes' identifiers (build files, proxies,
//!   dependencies) are visited after the nodes they borrow from.

mod compose;
mod generator;

pub use compose::compose;
pub use generator::{generate, GenerateError};
