// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Closed set of CI providers and the operations the orchestration layer
//! calls on them.
//!
//! Each provider keeps its own settings record and view type. [`CiPlugin`]
//! dispatches `source`, `destination`, `badges` and `view` to the provider.
//! Adding a provider means adding a variant here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    appveyor::{AppVeyor, AppVeyorView},
    badge::Badge,
    cirrus::{CirrusCi, CirrusView},
    drone::{DroneCi, DroneView},
    gitlab::{GitLabCi, GitLabView},
    plugin::{PackageContext, PluginKind},
    travis::{TravisCi, TravisView}
};

/// Directory holding the built-in templates.
pub const TEMPLATES_DIR: &str = "templates";

/// Resolves a built-in template by file name.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// assert_eq!(pkgci::default_file("travis.yml"), Path::new("templates/travis.yml"));
/// ```
pub fn default_file(name: &str) -> PathBuf {
    Path::new(TEMPLATES_DIR).join(name)
}

/// A configured CI provider.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CiPlugin {
    /// Travis CI.
    TravisCi(TravisCi),
    /// AppVeyor.
    #[serde(rename = "appveyor")]
    AppVeyor(AppVeyor),
    /// Cirrus CI.
    CirrusCi(CirrusCi),
    /// GitLab CI.
    #[serde(rename = "gitlab_ci")]
    GitLabCi(GitLabCi),
    /// Drone CI.
    DroneCi(DroneCi)
}

/// Provider-specific data handed to the template renderer.
///
/// Serializes as a flat mapping of upper-case field names.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum View {
    /// Travis CI view.
    TravisCi(TravisView),
    /// AppVeyor view.
    AppVeyor(AppVeyorView),
    /// Cirrus CI view.
    CirrusCi(CirrusView),
    /// GitLab CI view.
    GitLabCi(GitLabView),
    /// Drone CI view.
    DroneCi(DroneView)
}

impl CiPlugin {
    /// Sibling kind this plugin registers as.
    pub fn kind(&self) -> PluginKind {
        match self {
            Self::TravisCi(_) => PluginKind::TravisCi,
            Self::AppVeyor(_) => PluginKind::AppVeyor,
            Self::CirrusCi(_) => PluginKind::CirrusCi,
            Self::GitLabCi(_) => PluginKind::GitLabCi,
            Self::DroneCi(_) => PluginKind::DroneCi
        }
    }

    /// Template the view is rendered into.
    pub fn source(&self) -> &Path {
        match self {
            Self::TravisCi(plugin) => &plugin.file,
            Self::AppVeyor(plugin) => &plugin.file,
            Self::CirrusCi(plugin) => &plugin.file,
            Self::GitLabCi(plugin) => &plugin.file,
            Self::DroneCi(plugin) => &plugin.file
        }
    }

    /// Output path relative to the package root.
    pub fn destination(&self) -> &str {
        match self {
            Self::TravisCi(_) => TravisCi::DESTINATION,
            Self::AppVeyor(_) => AppVeyor::DESTINATION,
            Self::CirrusCi(_) => CirrusCi::DESTINATION,
            Self::GitLabCi(_) => GitLabCi::DESTINATION,
            Self::DroneCi(plugin) => &plugin.destination
        }
    }

    /// README badges contributed by this plugin.
    pub fn badges(&self) -> Vec<Badge> {
        match self {
            Self::TravisCi(_) => vec![TravisCi::BADGE],
            Self::AppVeyor(_) => vec![AppVeyor::BADGE],
            Self::CirrusCi(_) => vec![CirrusCi::BADGE],
            Self::GitLabCi(plugin) => plugin.badges(),
            Self::DroneCi(_) => vec![DroneCi::BADGE]
        }
    }

    /// Derives the template view for `pkg` within `context`.
    pub fn view(&self, context: &PackageContext<'_>, pkg: &str) -> View {
        match self {
            Self::TravisCi(plugin) => View::TravisCi(plugin.view(context, pkg)),
            Self::AppVeyor(plugin) => View::AppVeyor(plugin.view(context, pkg)),
            Self::CirrusCi(plugin) => View::CirrusCi(plugin.view(context, pkg)),
            Self::GitLabCi(plugin) => View::GitLabCi(plugin.view(context, pkg)),
            Self::DroneCi(plugin) => View::DroneCi(plugin.view(context, pkg))
        }
    }

    /// Returns `true` when the plugin produces a CI configuration file.
    pub fn is_ci(&self) -> bool {
        self.kind().is_ci()
    }

    /// Returns `true` when badge URLs of the plugin embed the template owner.
    pub fn needs_username(&self) -> bool {
        self.kind().needs_username()
    }
}
