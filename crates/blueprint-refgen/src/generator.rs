// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reference generation traversal.
//!
//! Visit order is dependency-respecting: project and targets first (their
//! identifiers seed almost everything else), then the group trees and
//! cross-graph file references, then per-target substructure, then the root
//! configuration list. Build files, proxies and dependencies deliberately
//! borrow identity from *other nodes' already-fixed identifiers* rather than
//! from names alone, which guarantees distinct seeds for anonymous siblings;
//! that is why the name-bearing kinds must be fully fixed before them.
//!
//! Unresolved cross-references inside a branch are tolerated: the branch is
//! skipped (or the unresolved component omitted from the seed chain) with a
//! warning, and the rest of the pass proceeds. Already-fixed references are
//! never rolled back. The only fatal condition is a declared root that does
//! not resolve to a project node.

use blueprint_graph::{Object, ObjectGraph, ObjectId};
use thiserror::Error;
use tracing::{debug, warn};

use crate::compose::compose;

/// Errors that abort a generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The graph declares a root project reference that resolves to no node.
    #[error("declared root project does not resolve: {0:?}")]
    DanglingRoot(ObjectId),
    /// The graph's declared root resolves to a node of another kind.
    #[error("declared root is not a project node: {0:?}")]
    RootNotProject(ObjectId),
}

/// Replaces every still-temporary reference in `graph` with its permanent,
/// deterministic value.
///
/// Safe to re-run: references already fixed keep their exact values and a
/// pass over a fully-fixed graph performs zero mutations. A graph that
/// declares no root reference at all is a deliberate no-op.
///
/// # Errors
///
/// Returns [`GenerateError::DanglingRoot`] or
/// [`GenerateError::RootNotProject`] when the declared root reference does
/// not resolve to a project node. No mutation is applied in that case.
pub fn generate(graph: &mut ObjectGraph) -> Result<(), GenerateError> {
    let Some(root) = graph.root_project() else {
        debug!("no root project declared; nothing to generate");
        return Ok(());
    };
    let project = match graph.object(root) {
        None => return Err(GenerateError::DanglingRoot(root)),
        Some(Object::Project(project)) => project.clone(),
        Some(_) => return Err(GenerateError::RootNotProject(root)),
    };
    debug!(root = ?root, project = %project.name, "generating permanent references");

    // 1. Project.
    let project_seed = vec![project.name.clone()];
    fix_node(graph, root, &project_seed);

    // 2. Targets, by name only. Substructure follows in step 5, after the
    // file hierarchy is fully fixed.
    for target_id in &project.targets {
        let Some(target) = graph.target(*target_id) else {
            warn!(node = ?target_id, "project lists a target that does not resolve; skipping");
            continue;
        };
        let seed = with_element(&project_seed, &target.name);
        fix_node(graph, *target_id, &seed);
    }

    // 3. Group trees: main group, then products group.
    if let Some(group_id) = project.main_group {
        fix_group_tree(graph, group_id, &project_seed);
    }
    if let Some(group_id) = project.products_group {
        fix_group_tree(graph, group_id, &project_seed);
    }

    // 4. File nodes contributed by embedded graphs, seeded like group leaves.
    for file_id in &project.remote_file_refs {
        let Some(discriminator) = file_discriminator(graph, *file_id) else {
            warn!(file = ?file_id, "cross-graph reference does not resolve to a file; skipping");
            continue;
        };
        let seed = match discriminator {
            Some(d) => with_element(&project_seed, &d),
            None => project_seed.clone(),
        };
        fix_node(graph, *file_id, &seed);
    }

    // 5. Per-target substructure.
    for target_id in &project.targets {
        let Some(target) = graph.target(*target_id).cloned() else {
            continue;
        };
        let target_seed = with_element(&project_seed, &target.name);

        if let Some(list_id) = target.configuration_list {
            fix_configuration_list(graph, list_id, &target_seed);
        }
        for phase_id in &target.build_phases {
            fix_build_phase(graph, *phase_id, &target_seed);
        }
        for rule_id in &target.build_rules {
            fix_build_rule(graph, *rule_id, &target_seed);
        }
        for dependency_id in &target.dependencies {
            fix_dependency(graph, *dependency_id, &target_seed);
        }
    }

    // 6. Root configuration list, seeded from the project.
    if let Some(list_id) = project.configuration_list {
        fix_configuration_list(graph, list_id, &project_seed);
    }

    debug!(project = %project.name, "reference generation complete");
    Ok(())
}

/// Fixes one node's reference from its type name and `seed`, when the node
/// exists and is still temporary. Never replaces a permanent value.
fn fix_node(graph: &mut ObjectGraph, id: ObjectId, seed: &[String]) {
    if !graph.is_temporary(id) {
        return;
    }
    let Some(type_name) = graph.object(id).map(Object::type_name) else {
        return;
    };
    let value = compose(type_name, seed);
    graph.fix_reference(id, value);
}

fn with_element(seed: &[String], element: &str) -> Vec<String> {
    let mut next = seed.to_vec();
    next.push(element.to_owned());
    next
}

/// Resolves `id` as a file reference. `None` when the handle does not point
/// at a file node; `Some(discriminator)` otherwise.
fn file_discriminator(graph: &ObjectGraph, id: ObjectId) -> Option<Option<String>> {
    graph
        .file_reference(id)
        .map(|file| file.discriminator().map(str::to_owned))
}

/// Walks a group subtree top-down, extending the seed at each named group.
///
/// The group's own reference is fixed with the extended seed, and children
/// are recursed into with that same seed even when the group was already
/// permanent: fixing is per-node, never a subtree short-circuit.
fn fix_group_tree(graph: &mut ObjectGraph, id: ObjectId, seed: &[String]) {
    let Some(group) = graph.group(id) else {
        warn!(group = ?id, "group handle does not resolve; skipping subtree");
        return;
    };
    let seed = match group.discriminator() {
        Some(d) => with_element(seed, d),
        None => seed.to_vec(),
    };
    let children = group.children.clone();
    fix_node(graph, id, &seed);

    for child in children {
        if graph.group(child).is_some() {
            fix_group_tree(graph, child, &seed);
            continue;
        }
        match file_discriminator(graph, child) {
            Some(Some(d)) => {
                let file_seed = with_element(&seed, &d);
                fix_node(graph, child, &file_seed);
            }
            Some(None) => fix_node(graph, child, &seed),
            None => {
                warn!(child = ?child, "group child is neither group nor file; skipping");
            }
        }
    }
}

/// Fixes a configuration list with `seed`, then every still-temporary
/// configuration in it with `seed + [configuration name]`. Configurations
/// already permanent keep their exact values.
fn fix_configuration_list(graph: &mut ObjectGraph, id: ObjectId, seed: &[String]) {
    let Some(list) = graph.configuration_list(id) else {
        warn!(list = ?id, "configuration list does not resolve; skipping");
        return;
    };
    let configurations = list.configurations.clone();
    fix_node(graph, id, seed);

    for configuration_id in configurations {
        let Some(name) = graph
            .build_configuration(configuration_id)
            .map(|c| c.name.clone())
        else {
            warn!(configuration = ?configuration_id, "configuration does not resolve; skipping");
            continue;
        };
        if !graph.is_temporary(configuration_id) {
            continue;
        }
        let configuration_seed = with_element(seed, &name);
        fix_node(graph, configuration_id, &configuration_seed);
    }
}

/// Fixes a build phase, then its build-file entries.
///
/// A build-file's seed borrows the wrapped file's *permanent* value, which
/// step 3 has already produced for every file reachable through the group
/// trees. A wrapped file that does not resolve (or is somehow still
/// temporary) contributes nothing to the seed.
fn fix_build_phase(graph: &mut ObjectGraph, id: ObjectId, target_seed: &[String]) {
    let Some(phase) = graph.build_phase(id) else {
        warn!(phase = ?id, "build phase does not resolve; skipping");
        return;
    };
    let phase_seed = match phase.discriminator() {
        Some(d) => with_element(target_seed, d),
        None => target_seed.to_vec(),
    };
    let files = phase.files.clone();
    fix_node(graph, id, &phase_seed);

    for build_file_id in files {
        let Some(build_file) = graph.build_file(build_file_id) else {
            warn!(build_file = ?build_file_id, "build file does not resolve; skipping");
            continue;
        };
        let wrapped = build_file.file;
        if !graph.is_temporary(build_file_id) {
            continue;
        }
        let seed = match wrapped.and_then(|file_id| graph.permanent(file_id)) {
            Some(value) => with_element(&phase_seed, value.as_str()),
            None => {
                warn!(
                    build_file = ?build_file_id,
                    "wrapped file has no fixed reference; seeding from phase alone"
                );
                phase_seed.clone()
            }
        };
        fix_node(graph, build_file_id, &seed);
    }
}

/// Fixes a build rule with `target-seed + [rule name]` when named, else with
/// the target seed unchanged.
fn fix_build_rule(graph: &mut ObjectGraph, id: ObjectId, target_seed: &[String]) {
    let Some(rule) = graph.build_rule(id) else {
        warn!(rule = ?id, "build rule does not resolve; skipping");
        return;
    };
    let seed = match rule.name.as_deref() {
        Some(name) => with_element(target_seed, name),
        None => target_seed.to_vec(),
    };
    fix_node(graph, id, &seed);
}

/// Fixes a target dependency and (first) its proxy.
///
/// The proxy is fixed from the raw remote global identifier, used verbatim.
/// The dependency's own seed then appends the referenced target's and the
/// proxy's fixed values; either component is omitted when it cannot be
/// resolved to a permanent value.
fn fix_dependency(graph: &mut ObjectGraph, id: ObjectId, target_seed: &[String]) {
    let Some(dependency) = graph.target_dependency(id).cloned() else {
        warn!(dependency = ?id, "target dependency does not resolve; skipping");
        return;
    };

    if let Some(proxy_id) = dependency.target_proxy {
        if graph.is_temporary(proxy_id) {
            match graph
                .target_proxy(proxy_id)
                .and_then(|p| p.remote_global_id.clone())
            {
                Some(remote) => {
                    let seed = with_element(target_seed, &remote);
                    fix_node(graph, proxy_id, &seed);
                }
                None if graph.target_proxy(proxy_id).is_none() => {
                    warn!(proxy = ?proxy_id, "target proxy does not resolve; skipping");
                }
                // Proxy without a remote identifier stays temporary.
                None => {}
            }
        }
    }

    if !graph.is_temporary(id) {
        return;
    }
    let mut seed = target_seed.to_vec();
    if let Some(target_id) = dependency.target {
        match graph.permanent(target_id) {
            Some(value) => seed.push(value.as_str().to_owned()),
            None => {
                warn!(
                    dependency = ?id,
                    referenced = ?target_id,
                    "dependency target has no fixed reference; omitting from seed"
                );
            }
        }
    }
    if let Some(proxy_id) = dependency.target_proxy {
        match graph.permanent(proxy_id) {
            Some(value) => seed.push(value.as_str().to_owned()),
            None => {
                warn!(
                    dependency = ?id,
                    proxy = ?proxy_id,
                    "dependency proxy has no fixed reference; omitting from seed"
                );
            }
        }
    }
    fix_node(graph, id, &seed);
}
