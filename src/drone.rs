// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Drone CI configuration and view derivation.
//!
//! Drone pipelines are Starlark scripts. The template splices `ARCHES` and
//! `VERSIONS` straight into list literals, so both are pre-serialized here as
//! comma-joined quoted tokens rather than left as lists.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    badge::Badge,
    ci::default_file,
    plugin::PackageContext,
    version::{self, DEFAULT_CI_VERSIONS_NO_NIGHTLY, VersionSpec}
};

/// Settings of the Drone CI plugin.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DroneCi {
    /// Starlark template.
    pub file:           PathBuf,
    /// Path of the rendered file inside the package.
    pub destination:    String,
    /// Build on x86-64.
    pub amd64:          bool,
    /// Build on 32-bit ARM.
    pub arm:            bool,
    /// Build on ARM64.
    pub arm64:          bool,
    /// Versions tested besides the package's own.
    pub extra_versions: Vec<VersionSpec>
}

impl Default for DroneCi {
    fn default() -> Self {
        Self {
            file:           default_file("drone.star"),
            destination:    DroneCi::DEFAULT_DESTINATION.to_owned(),
            amd64:          true,
            arm:            false,
            arm64:          false,
            extra_versions: version::version_table(DEFAULT_CI_VERSIONS_NO_NIGHTLY)
        }
    }
}

/// Data handed to the `.drone.star` template.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DroneView {
    /// `ARCHES`: quoted, comma-separated architectures.
    pub arches:   String,
    /// `PKG`: package name without the `.jl` suffix.
    pub pkg:      String,
    /// `USER`: owner of the repository.
    pub user:     String,
    /// `VERSIONS`: quoted, comma-separated canonical versions.
    pub versions: String
}

impl DroneCi {
    /// Destination used when none is configured.
    pub const DEFAULT_DESTINATION: &'static str = ".drone.star";

    /// Build status badge.
    pub const BADGE: Badge = Badge::new(
        "Build Status",
        "https://cloud.drone.io/api/badges/{{{USER}}}/{{{PKG}}}.jl/status.svg",
        "https://cloud.drone.io/{{{USER}}}/{{{PKG}}}.jl"
    );

    /// Enabled architectures in `amd64`, `arm`, `arm64` order.
    pub fn arches(&self) -> Vec<&'static str> {
        [(self.amd64, "amd64"), (self.arm, "arm"), (self.arm64, "arm64")]
            .into_iter()
            .filter_map(|(enabled, arch)| enabled.then_some(arch))
            .collect()
    }

    /// Derives the template view for `pkg`.
    pub fn view(&self, context: &PackageContext<'_>, pkg: &str) -> DroneView {
        let versions = version::collect_versions(context.version, &self.extra_versions);

        DroneView {
            arches:   quote_list(self.arches()),
            pkg:      pkg.to_owned(),
            user:     context.user.to_owned(),
            versions: quote_list(versions)
        }
    }
}

/// Joins items as `"a", "b"` for a Starlark list literal.
fn quote_list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>
{
    items
        .into_iter()
        .map(|item| format!("\"{}\"", item.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}
