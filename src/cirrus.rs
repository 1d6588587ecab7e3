// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Cirrus CI configuration and view derivation. Cirrus builds on FreeBSD.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    badge::Badge,
    ci::default_file,
    plugin::{PackageContext, PluginKind},
    version::{self, DEFAULT_CI_VERSIONS, VersionSpec}
};

/// FreeBSD image used when none is configured.
pub const DEFAULT_FREEBSD_IMAGE: &str = "freebsd-12-0-release-amd64";

/// Settings of the Cirrus CI plugin.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CirrusCi {
    /// Template rendered into `.cirrus.yml`.
    pub file:           PathBuf,
    /// FreeBSD image family. Passed through unvalidated.
    pub image:          String,
    /// Upload coverage when a coverage reporter is attached.
    pub coverage:       bool,
    /// Versions tested besides the package's own.
    pub extra_versions: Vec<VersionSpec>
}

impl Default for CirrusCi {
    fn default() -> Self {
        Self {
            file:           default_file("cirrus.yml"),
            image:          DEFAULT_FREEBSD_IMAGE.to_owned(),
            coverage:       true,
            extra_versions: version::version_table(DEFAULT_CI_VERSIONS)
        }
    }
}

/// Data handed to the `.cirrus.yml` template.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CirrusView {
    /// `ALLOW_FAILURES`: versions whose jobs may fail.
    pub allow_failures:     Vec<String>,
    /// `HAS_ALLOW_FAILURES`: whether any version may fail.
    pub has_allow_failures: bool,
    /// `HAS_CODECOV`: upload coverage to Codecov.
    pub has_codecov:        bool,
    /// `HAS_COVERAGE`: collect coverage at all.
    pub has_coverage:       bool,
    /// `HAS_COVERALLS`: upload coverage to Coveralls.
    pub has_coveralls:      bool,
    /// `IMAGE`: FreeBSD image used by the runner.
    pub image:              String,
    /// `PKG`: package name without the `.jl` suffix.
    pub pkg:                String,
    /// `USER`: owner of the repository.
    pub user:               String,
    /// `VERSIONS`: canonical versions to test.
    pub versions:           Vec<String>
}

impl CirrusCi {
    /// Path of the rendered file inside the package.
    pub const DESTINATION: &'static str = ".cirrus.yml";

    /// Build status badge.
    pub const BADGE: Badge = Badge::new(
        "Build Status",
        "https://api.cirrus-ci.com/github/{{{USER}}}/{{{PKG}}}.jl.svg",
        "https://cirrus-ci.com/github/{{{USER}}}/{{{PKG}}}.jl"
    );

    /// Derives the template view for `pkg`.
    pub fn view(&self, context: &PackageContext<'_>, pkg: &str) -> CirrusView {
        let versions = version::collect_versions(context.version, &self.extra_versions);
        let allow_failures = version::allowed_failures(&versions);

        CirrusView {
            has_allow_failures: !allow_failures.is_empty(),
            allow_failures,
            has_codecov: self.coverage && context.has_plugin(PluginKind::Codecov),
            has_coverage: self.coverage && context.has_coverage_plugin(),
            has_coveralls: self.coverage && context.has_plugin(PluginKind::Coveralls),
            image: self.image.clone(),
            pkg: pkg.to_owned(),
            user: context.user.to_owned(),
            versions
        }
    }
}
