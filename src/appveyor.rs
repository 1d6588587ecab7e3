// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! AppVeyor configuration and view derivation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    badge::Badge,
    ci::default_file,
    plugin::{PackageContext, PluginKind},
    version::{self, DEFAULT_CI_VERSIONS, VersionSpec}
};

/// Settings of the AppVeyor plugin.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AppVeyor {
    /// Template rendered into `.appveyor.yml`.
    pub file:           PathBuf,
    /// Also build on the 32-bit platform.
    pub x86:            bool,
    /// Upload coverage to Codecov when it is attached.
    pub coverage:       bool,
    /// Versions tested besides the package's own.
    pub extra_versions: Vec<VersionSpec>
}

impl Default for AppVeyor {
    fn default() -> Self {
        Self {
            file:           default_file("appveyor.yml"),
            x86:            false,
            coverage:       true,
            extra_versions: version::version_table(DEFAULT_CI_VERSIONS)
        }
    }
}

/// Data handed to the `.appveyor.yml` template.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AppVeyorView {
    /// `ALLOW_FAILURES`: versions whose jobs may fail.
    pub allow_failures:     Vec<String>,
    /// `HAS_ALLOW_FAILURES`: whether any version may fail.
    pub has_allow_failures: bool,
    /// `HAS_CODECOV`: upload coverage to Codecov.
    pub has_codecov:        bool,
    /// `PKG`: package name without the `.jl` suffix.
    pub pkg:                String,
    /// `PLATFORMS`: target platforms.
    pub platforms:          Vec<&'static str>,
    /// `USER`: owner of the repository.
    pub user:               String,
    /// `VERSIONS`: canonical versions to test.
    pub versions:           Vec<String>
}

impl AppVeyor {
    /// Path of the rendered file inside the package.
    pub const DESTINATION: &'static str = ".appveyor.yml";

    /// Build status badge.
    pub const BADGE: Badge = Badge::new(
        "Build Status",
        "https://ci.appveyor.com/api/projects/status/github/{{{USER}}}/{{{PKG}}}.jl?svg=true",
        "https://ci.appveyor.com/project/{{{USER}}}/{{{PKG}}}-jl"
    );

    /// Build platforms, 64-bit first.
    pub fn platforms(&self) -> Vec<&'static str> {
        let mut platforms = vec!["x64"];
        if self.x86 {
            platforms.push("x86");
        }
        platforms
    }

    /// Derives the template view for `pkg`.
    pub fn view(&self, context: &PackageContext<'_>, pkg: &str) -> AppVeyorView {
        let versions = version::collect_versions(context.version, &self.extra_versions);
        let allow_failures = version::allowed_failures(&versions);

        AppVeyorView {
            has_allow_failures: !allow_failures.is_empty(),
            allow_failures,
            has_codecov: self.coverage && context.has_plugin(PluginKind::Codecov),
            pkg: pkg.to_owned(),
            platforms: self.platforms(),
            user: context.user.to_owned(),
            versions
        }
    }
}
