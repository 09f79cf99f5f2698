// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Property tests for generation: permanent identifiers are a pure function
//! of structure (node kinds, names, hierarchy), never of the temporary
//! placeholder values, and a full pass leaves every reference permanent,
//! pairwise distinct, and stable under re-runs.
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeSet;

use blueprint_graph::{
    BuildConfiguration, BuildFile, BuildPhase, BuildPhaseKind, BuildRule, ConfigurationList,
    FileReference, Group, Object, ObjectGraph, ObjectId, Project, Reference, Target,
    TargetDependency, TargetProxy,
};
use blueprint_refgen::generate;
use proptest::prelude::*;

/// Builds a project graph with the given structure, recording every handle in
/// construction order. `noise` inserts-then-removes that many scratch nodes
/// first, shifting the temporary placeholder counter without changing the
/// structure.
fn build_project(
    project_name: &str,
    targets: &[String],
    files: &[String],
    noise: usize,
) -> (ObjectGraph, Vec<ObjectId>) {
    let mut graph = ObjectGraph::new();
    for _ in 0..noise {
        let scratch = graph.insert(Object::Group(Group::default()));
        graph.remove(scratch);
    }

    let mut handles = Vec::new();
    let mut track = |id: ObjectId| {
        handles.push(id);
        id
    };

    let file_ids: Vec<ObjectId> = files
        .iter()
        .map(|name| {
            track(graph.insert(Object::FileReference(FileReference {
                name: Some(name.clone()),
                path: None,
            })))
        })
        .collect();
    let files_group = track(graph.insert(Object::Group(Group {
        name: Some("Files".into()),
        path: None,
        children: file_ids.clone(),
    })));
    let main_group = track(graph.insert(Object::Group(Group {
        name: None,
        path: None,
        children: vec![files_group],
    })));

    let mut target_ids: Vec<ObjectId> = Vec::new();
    for (index, target_name) in targets.iter().enumerate() {
        let debug = track(graph.insert(Object::BuildConfiguration(BuildConfiguration {
            name: "Debug".into(),
        })));
        let release = track(graph.insert(Object::BuildConfiguration(BuildConfiguration {
            name: "Release".into(),
        })));
        let list = track(graph.insert(Object::ConfigurationList(ConfigurationList {
            configurations: vec![debug, release],
        })));

        let build_files: Vec<ObjectId> = file_ids
            .iter()
            .map(|file_id| {
                track(graph.insert(Object::BuildFile(BuildFile {
                    file: Some(*file_id),
                })))
            })
            .collect();
        let phase = track(graph.insert(Object::BuildPhase(BuildPhase {
            kind: BuildPhaseKind::Sources,
            name: None,
            files: build_files,
        })));
        let rule = track(graph.insert(Object::BuildRule(BuildRule {
            name: Some(format!("rule-{target_name}")),
        })));

        let mut dependencies = Vec::new();
        if index > 0 {
            let proxy = track(graph.insert(Object::TargetProxy(TargetProxy {
                remote_global_id: Some(format!("remote-{target_name}")),
            })));
            let dep = track(graph.insert(Object::TargetDependency(TargetDependency {
                target: Some(target_ids[index - 1]),
                target_proxy: Some(proxy),
            })));
            dependencies.push(dep);
        }

        let target = track(graph.insert(Object::Target(Target {
            name: target_name.clone(),
            configuration_list: Some(list),
            build_phases: vec![phase],
            build_rules: vec![rule],
            dependencies,
        })));
        target_ids.push(target);
    }

    let root_cfg = track(graph.insert(Object::BuildConfiguration(BuildConfiguration {
        name: "Root".into(),
    })));
    let root_list = track(graph.insert(Object::ConfigurationList(ConfigurationList {
        configurations: vec![root_cfg],
    })));
    let project = track(graph.insert(Object::Project(Project {
        name: project_name.to_owned(),
        targets: target_ids,
        main_group: Some(main_group),
        products_group: None,
        configuration_list: Some(root_list),
        remote_file_refs: Vec::new(),
    })));
    graph.set_root_project(project);

    (graph, handles)
}

fn name_set(max: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set("[a-z][a-z0-9]{0,6}", 1..max)
        .prop_map(|set| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn identifiers_depend_on_structure_not_placeholders(
        project_name in "[A-Za-z][A-Za-z0-9]{0,10}",
        targets in name_set(4),
        files in name_set(5),
        noise in 0usize..32,
    ) {
        let (mut a, handles_a) = build_project(&project_name, &targets, &files, 0);
        let (mut b, handles_b) = build_project(&project_name, &targets, &files, noise);

        generate(&mut a).unwrap();
        generate(&mut b).unwrap();

        prop_assert_eq!(handles_a.len(), handles_b.len());
        for (ha, hb) in handles_a.iter().zip(&handles_b) {
            prop_assert_eq!(
                a.permanent(*ha).expect("fixed"),
                b.permanent(*hb).expect("fixed")
            );
        }
    }

    #[test]
    fn full_pass_fixes_everything_uniquely_and_idempotently(
        project_name in "[A-Za-z][A-Za-z0-9]{0,10}",
        targets in name_set(4),
        files in name_set(5),
    ) {
        let (mut graph, _) = build_project(&project_name, &targets, &files, 0);
        generate(&mut graph).unwrap();

        // Everything fixed.
        prop_assert!(graph.iter_objects().all(|(_, r, _)| !r.is_temporary()));

        // Pairwise distinct.
        let ids: BTreeSet<String> = graph
            .iter_objects()
            .map(|(_, r, _)| r.permanent().expect("fixed").as_str().to_owned())
            .collect();
        prop_assert_eq!(ids.len(), graph.len());

        // A second pass over the fully-permanent graph changes nothing.
        let before: Vec<(ObjectId, Reference)> =
            graph.iter_objects().map(|(id, r, _)| (id, r.clone())).collect();
        generate(&mut graph).unwrap();
        let after: Vec<(ObjectId, Reference)> =
            graph.iter_objects().map(|(id, r, _)| (id, r.clone())).collect();
        prop_assert_eq!(before, after);
    }
}
