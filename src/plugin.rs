// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Plugin taxonomy shared by the view builders and the orchestration layer.
//!
//! View builders never see sibling plugins directly. They receive a
//! [`PackageContext`] whose [`SiblingQuery`] answers presence questions such
//! as "is a coverage reporter attached to this template".

use serde::{Deserialize, Serialize};

use crate::version::VersionSpec;

/// CI service a documentation plugin deploys from.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocsDeploy {
    /// Documentation is built locally only.
    #[default]
    None,
    /// Documentation is deployed from a Travis CI job.
    TravisCi,
    /// Documentation is deployed from GitLab pages.
    #[serde(rename = "gitlab_ci")]
    GitLabCi
}

/// Kind of a plugin attached to a package template.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PluginKind {
    /// Travis CI configuration.
    TravisCi,
    /// AppVeyor configuration.
    #[serde(rename = "appveyor")]
    AppVeyor,
    /// Cirrus CI configuration.
    CirrusCi,
    /// GitLab CI configuration.
    #[serde(rename = "gitlab_ci")]
    GitLabCi,
    /// Drone CI configuration.
    DroneCi,
    /// Codecov coverage reporting.
    Codecov,
    /// Coveralls coverage reporting.
    Coveralls,
    /// Documentation generation, optionally deployed from a CI service.
    Documenter(DocsDeploy)
}

impl PluginKind {
    /// Name used for this kind in template documents and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::TravisCi => "travis_ci",
            Self::AppVeyor => "appveyor",
            Self::CirrusCi => "cirrus_ci",
            Self::GitLabCi => "gitlab_ci",
            Self::DroneCi => "drone_ci",
            Self::Codecov => "codecov",
            Self::Coveralls => "coveralls",
            Self::Documenter(_) => "documenter"
        }
    }

    /// Returns `true` for plugins that produce a CI configuration file.
    pub fn is_ci(self) -> bool {
        matches!(
            self,
            Self::TravisCi | Self::AppVeyor | Self::CirrusCi | Self::GitLabCi | Self::DroneCi
        )
    }

    /// Returns `true` for plugins whose badges embed the owner name.
    ///
    /// The orchestration layer prompts for a username when any attached
    /// plugin answers `true`.
    pub fn needs_username(self) -> bool {
        self.is_ci()
    }

    /// Returns `true` for coverage reporting services.
    pub fn is_coverage(self) -> bool {
        matches!(self, Self::Codecov | Self::Coveralls)
    }
}

/// Read-only presence queries over the plugins attached to a template.
pub trait SiblingQuery {
    /// Returns `true` when at least one attached plugin satisfies `predicate`.
    fn has_plugin_where(&self, predicate: &dyn Fn(PluginKind) -> bool) -> bool;

    /// Returns `true` when a plugin of exactly `kind` is attached.
    fn has_plugin(&self, kind: PluginKind) -> bool {
        self.has_plugin_where(&|candidate: PluginKind| candidate == kind)
    }
}

impl SiblingQuery for [PluginKind] {
    fn has_plugin_where(&self, predicate: &dyn Fn(PluginKind) -> bool) -> bool {
        self.iter().copied().any(predicate)
    }
}

impl SiblingQuery for Vec<PluginKind> {
    fn has_plugin_where(&self, predicate: &dyn Fn(PluginKind) -> bool) -> bool {
        self.as_slice().has_plugin_where(predicate)
    }
}

/// Borrowed view of the enclosing package template.
#[derive(Clone, Copy)]
pub struct PackageContext<'a> {
    /// Owner of the generated repository.
    pub user:     &'a str,
    /// Primary language version of the package.
    pub version:  &'a VersionSpec,
    /// Presence queries over sibling plugins.
    pub siblings: &'a (dyn SiblingQuery + Sync)
}

impl<'a> PackageContext<'a> {
    /// Creates a context from its parts.
    pub fn new(
        user: &'a str,
        version: &'a VersionSpec,
        siblings: &'a (dyn SiblingQuery + Sync)
    ) -> Self {
        Self {
            user,
            version,
            siblings
        }
    }

    /// Shorthand for [`SiblingQuery::has_plugin`].
    pub fn has_plugin(&self, kind: PluginKind) -> bool {
        self.siblings.has_plugin(kind)
    }

    /// Returns `true` when any coverage reporter is attached.
    pub fn has_coverage_plugin(&self) -> bool {
        self.siblings.has_plugin_where(&PluginKind::is_coverage)
    }
}

impl std::fmt::Debug for PackageContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageContext")
            .field("user", &self.user)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
