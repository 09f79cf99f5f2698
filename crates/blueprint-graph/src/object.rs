// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Closed sum type over the node kinds of a project description graph.
//!
//! Structural relations between nodes are expressed as [`ObjectId`] handles
//! resolved through the owning [`crate::ObjectGraph`]; a handle may dangle
//! (e.g. a dependency whose target was deleted) and resolution is always a
//! lookup, never a dereference of an ownership edge.

use crate::graph::ObjectId;

/// Root node of a graph: one buildable project.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Project {
    /// Project name, used as the first discriminator of every seed chain.
    pub name: String,
    /// Buildable units, in declaration order.
    pub targets: Vec<ObjectId>,
    /// Root of the file/group hierarchy.
    pub main_group: Option<ObjectId>,
    /// Group collecting built products, walked like a second group tree.
    pub products_group: Option<ObjectId>,
    /// Project-level configuration list.
    pub configuration_list: Option<ObjectId>,
    /// File nodes contributed by other graph instances embedded in this one
    /// (cross-graph project references). Entries may dangle.
    pub remote_file_refs: Vec<ObjectId>,
}

/// One buildable unit of a project.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    /// Target name; combined with the project name it discriminates the
    /// target and seeds all of its substructure.
    pub name: String,
    /// Target-level configuration list.
    pub configuration_list: Option<ObjectId>,
    /// Build phases, in declaration order.
    pub build_phases: Vec<ObjectId>,
    /// Custom build rules, in declaration order.
    pub build_rules: Vec<ObjectId>,
    /// Dependencies on other targets, possibly via proxies.
    pub dependencies: Vec<ObjectId>,
}

/// Named container in the file hierarchy.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Group {
    /// Display name, when distinct from the filesystem path.
    pub name: Option<String>,
    /// Filesystem path component.
    pub path: Option<String>,
    /// Child groups and file references, in declaration order.
    pub children: Vec<ObjectId>,
}

impl Group {
    /// Discriminator contributed to descendant seed chains: the display name
    /// when set, else the path component. A group with neither contributes
    /// nothing (its children inherit the parent seed unchanged).
    #[must_use]
    pub fn discriminator(&self) -> Option<&str> {
        self.name.as_deref().or(self.path.as_deref())
    }
}

/// Leaf node of the file hierarchy: a reference to one file on disk.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileReference {
    /// Display name, when distinct from the filesystem path.
    pub name: Option<String>,
    /// Filesystem path component.
    pub path: Option<String>,
}

impl FileReference {
    /// Discriminator for this file's own seed chain: name else path, never
    /// derived from sibling order.
    #[must_use]
    pub fn discriminator(&self) -> Option<&str> {
        self.name.as_deref().or(self.path.as_deref())
    }
}

/// Ordered collection of build configurations.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfigurationList {
    /// Build configurations, in declaration order.
    pub configurations: Vec<ObjectId>,
}

/// One named build configuration (e.g. "Debug").
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildConfiguration {
    /// Configuration name.
    pub name: String,
}

/// Structural kind of a build phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildPhaseKind {
    /// Compiles source files.
    Sources,
    /// Links frameworks and libraries.
    Frameworks,
    /// Copies resource files into the product.
    Resources,
    /// Installs header files.
    Headers,
    /// Copies arbitrary files to a destination.
    CopyFiles,
    /// Runs a user-provided script. Carries no canonical label; an unnamed
    /// script phase contributes nothing to its seed chain.
    ShellScript,
}

impl BuildPhaseKind {
    /// Kind-specific type name used as seed-chain element 0.
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Sources => "SourcesBuildPhase",
            Self::Frameworks => "FrameworksBuildPhase",
            Self::Resources => "ResourcesBuildPhase",
            Self::Headers => "HeadersBuildPhase",
            Self::CopyFiles => "CopyFilesBuildPhase",
            Self::ShellScript => "ShellScriptBuildPhase",
        }
    }

    /// Canonical label for kinds whose name is implied by their role.
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Sources => Some("Sources"),
            Self::Frameworks => Some("Frameworks"),
            Self::Resources => Some("Resources"),
            Self::Headers => Some("Headers"),
            Self::CopyFiles => Some("CopyFiles"),
            Self::ShellScript => None,
        }
    }
}

/// One build step of a target.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildPhase {
    /// Structural kind of this phase.
    pub kind: BuildPhaseKind,
    /// Explicit phase name, overriding the kind's canonical label.
    pub name: Option<String>,
    /// Build-file entries processed by this phase, in declaration order.
    pub files: Vec<ObjectId>,
}

impl BuildPhase {
    /// Creates an empty phase of `kind`.
    #[must_use]
    pub fn new(kind: BuildPhaseKind) -> Self {
        Self {
            kind,
            name: None,
            files: Vec::new(),
        }
    }

    /// Discriminator contributed to this phase's seed chain: the explicit
    /// name when set, else the kind's canonical label when it has one.
    #[must_use]
    pub fn discriminator(&self) -> Option<&str> {
        self.name.as_deref().or_else(|| self.kind.label())
    }
}

/// Entry of a build phase wrapping one underlying file node.
///
/// Build files have no intrinsic name; their identity borrows from the
/// wrapped file's already-fixed permanent reference.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildFile {
    /// The wrapped file node. May dangle.
    pub file: Option<ObjectId>,
}

/// Custom build rule of a target.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildRule {
    /// Rule name, when the rule is named.
    pub name: Option<String>,
}

/// Declares that one target depends on another, possibly in a different
/// graph instance reached through a proxy.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetDependency {
    /// The depended-upon target, when it lives in this graph. May dangle.
    pub target: Option<ObjectId>,
    /// Proxy standing in for a remote target. May dangle.
    pub target_proxy: Option<ObjectId>,
}

/// Proxy carrying the identity of a target in another graph instance.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetProxy {
    /// Raw identifier of the remote target, used verbatim in seed chains.
    pub remote_global_id: Option<String>,
}

/// A graph node: closed tagged variant over every node kind.
///
/// Keeping the set closed lets the compiler enforce exhaustive handling in
/// the generation traversal when a kind is added.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Object {
    /// Root project node.
    Project(Project),
    /// Buildable unit.
    Target(Target),
    /// File hierarchy container.
    Group(Group),
    /// File hierarchy leaf.
    FileReference(FileReference),
    /// Ordered configuration collection.
    ConfigurationList(ConfigurationList),
    /// Single named configuration.
    BuildConfiguration(BuildConfiguration),
    /// One build step.
    BuildPhase(BuildPhase),
    /// Phase entry wrapping a file.
    BuildFile(BuildFile),
    /// Custom build rule.
    BuildRule(BuildRule),
    /// Target-to-target dependency.
    TargetDependency(TargetDependency),
    /// Remote target stand-in.
    TargetProxy(TargetProxy),
}

impl Object {
    /// Type name used as element 0 of this node's seed chain.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Project(_) => "Project",
            Self::Target(_) => "Target",
            Self::Group(_) => "Group",
            Self::FileReference(_) => "FileReference",
            Self::ConfigurationList(_) => "ConfigurationList",
            Self::BuildConfiguration(_) => "BuildConfiguration",
            Self::BuildPhase(phase) => phase.kind.type_name(),
            Self::BuildFile(_) => "BuildFile",
            Self::BuildRule(_) => "BuildRule",
            Self::TargetDependency(_) => "TargetDependency",
            Self::TargetProxy(_) => "TargetProxy",
        }
    }

    /// Returns the project payload when this node is a project.
    #[must_use]
    pub fn as_project(&self) -> Option<&Project> {
        match self {
            Self::Project(p) => Some(p),
            _ => None,
        }
    }

    /// Returns the target payload when this node is a target.
    #[must_use]
    pub fn as_target(&self) -> Option<&Target> {
        match self {
            Self::Target(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the group payload when this node is a group.
    #[must_use]
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Returns the file payload when this node is a file reference.
    #[must_use]
    pub fn as_file_reference(&self) -> Option<&FileReference> {
        match self {
            Self::FileReference(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the list payload when this node is a configuration list.
    #[must_use]
    pub fn as_configuration_list(&self) -> Option<&ConfigurationList> {
        match self {
            Self::ConfigurationList(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the configuration payload when this node is a configuration.
    #[must_use]
    pub fn as_build_configuration(&self) -> Option<&BuildConfiguration> {
        match self {
            Self::BuildConfiguration(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the phase payload when this node is a build phase.
    #[must_use]
    pub fn as_build_phase(&self) -> Option<&BuildPhase> {
        match self {
            Self::BuildPhase(p) => Some(p),
            _ => None,
        }
    }

    /// Returns the build-file payload when this node is a build file.
    #[must_use]
    pub fn as_build_file(&self) -> Option<&BuildFile> {
        match self {
            Self::BuildFile(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the rule payload when this node is a build rule.
    #[must_use]
    pub fn as_build_rule(&self) -> Option<&BuildRule> {
        match self {
            Self::BuildRule(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the dependency payload when this node is a dependency.
    #[must_use]
    pub fn as_target_dependency(&self) -> Option<&TargetDependency> {
        match self {
            Self::TargetDependency(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the proxy payload when this node is a target proxy.
    #[must_use]
    pub fn as_target_proxy(&self) -> Option<&TargetProxy> {
        match self {
            Self::TargetProxy(p) => Some(p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_discriminator_prefers_name_over_path() {
        let g = Group {
            name: Some("Sources".into()),
            path: Some("src".into()),
            children: Vec::new(),
        };
        assert_eq!(g.discriminator(), Some("Sources"));

        let g = Group {
            name: None,
            path: Some("src".into()),
            children: Vec::new(),
        };
        assert_eq!(g.discriminator(), Some("src"));

        let g = Group::default();
        assert_eq!(g.discriminator(), None);
    }

    #[test]
    fn unnamed_script_phase_has_no_discriminator() {
        let phase = BuildPhase::new(BuildPhaseKind::ShellScript);
        assert_eq!(phase.discriminator(), None);

        let phase = BuildPhase::new(BuildPhaseKind::Sources);
        assert_eq!(phase.discriminator(), Some("Sources"));

        let mut phase = BuildPhase::new(BuildPhaseKind::ShellScript);
        phase.name = Some("Lint".into());
        assert_eq!(phase.discriminator(), Some("Lint"));
    }

    #[test]
    fn phase_type_name_tracks_kind() {
        let phase = BuildPhase::new(BuildPhaseKind::Frameworks);
        assert_eq!(
            Object::BuildPhase(phase).type_name(),
            "FrameworksBuildPhase"
        );
        assert_eq!(
            Object::Project(Project::default()).type_name(),
            "Project"
        );
    }
}
