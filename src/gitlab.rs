// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! GitLab CI configuration and view derivation.
//!
//! GitLab runners have no nightly image, so the default extra versions leave
//! it out. An explicitly configured `nightly` is still rendered.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    badge::Badge,
    ci::default_file,
    plugin::{DocsDeploy, PackageContext, PluginKind},
    version::{self, DEFAULT_CI_VERSIONS_NO_NIGHTLY, VersionSpec}
};

/// Settings of the GitLab CI plugin.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GitLabCi {
    /// Template rendered into `.gitlab-ci.yml`.
    pub file:           PathBuf,
    /// Collect coverage through GitLab and show a coverage badge.
    pub coverage:       bool,
    /// Versions tested besides the package's own.
    pub extra_versions: Vec<VersionSpec>
}

impl Default for GitLabCi {
    fn default() -> Self {
        Self {
            file:           default_file("gitlab-ci.yml"),
            coverage:       true,
            extra_versions: version::version_table(DEFAULT_CI_VERSIONS_NO_NIGHTLY)
        }
    }
}

/// Data handed to the `.gitlab-ci.yml` template.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct GitLabView {
    /// `HAS_COVERAGE`: collect coverage through GitLab.
    pub has_coverage:   bool,
    /// `HAS_DOCUMENTER`: deploy documentation from this service.
    pub has_documenter: bool,
    /// `PKG`: package name without the `.jl` suffix.
    pub pkg:            String,
    /// `USER`: owner of the repository.
    pub user:           String,
    /// `VERSION`: canonical primary version.
    pub version:        String,
    /// `VERSIONS`: canonical versions to test.
    pub versions:       Vec<String>
}

impl GitLabCi {
    /// Path of the rendered file inside the package.
    pub const DESTINATION: &'static str = ".gitlab-ci.yml";

    /// Pipeline status badge.
    pub const BUILD_BADGE: Badge = Badge::new(
        "Build Status",
        "https://gitlab.com/{{{USER}}}/{{{PKG}}}.jl/badges/master/build.svg",
        "https://gitlab.com/{{{USER}}}/{{{PKG}}}.jl/pipelines"
    );

    /// Coverage badge, shown only with `coverage` enabled.
    pub const COVERAGE_BADGE: Badge = Badge::new(
        "Coverage",
        "https://gitlab.com/{{{USER}}}/{{{PKG}}}.jl/badges/master/coverage.svg",
        "https://gitlab.com/{{{USER}}}/{{{PKG}}}.jl/commits/master"
    );

    /// Badges for the README.
    pub fn badges(&self) -> Vec<Badge> {
        if self.coverage {
            vec![Self::BUILD_BADGE, Self::COVERAGE_BADGE]
        } else {
            vec![Self::BUILD_BADGE]
        }
    }

    /// Derives the template view for `pkg`.
    pub fn view(&self, context: &PackageContext<'_>, pkg: &str) -> GitLabView {
        GitLabView {
            has_coverage:   self.coverage,
            has_documenter: context.has_plugin(PluginKind::Documenter(DocsDeploy::GitLabCi)),
            pkg:            pkg.to_owned(),
            user:           context.user.to_owned(),
            version:        version::format_version(context.version),
            versions:       version::collect_versions(context.version, &self.extra_versions)
        }
    }
}
