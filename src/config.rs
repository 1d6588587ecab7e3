//! Template document types describing a package's CI plugins.
//!
//! The types in this module mirror the YAML documents consumed by the CLI.
//! Every plugin setting is optional and falls back to the provider default,
//! while unknown settings are rejected so typos surface early.

use serde::{Deserialize, Serialize};

use crate::{
    appveyor::AppVeyor,
    ci::CiPlugin,
    cirrus::CirrusCi,
    drone::DroneCi,
    gitlab::GitLabCi,
    plugin::{DocsDeploy, PluginKind},
    travis::TravisCi,
    version::{self, VersionSpec}
};

/// Root document describing one package template.
///
/// # Examples
///
/// ```
/// use pkgci::TemplateConfig;
///
/// let yaml = r#"
/// user: octocat
/// plugins:
///   - type: travis_ci
///     x86: true
///   - type: codecov
/// "#;
/// let config: TemplateConfig = serde_yaml::from_str(yaml).expect("valid template");
/// assert_eq!(config.plugins.len(), 2);
/// assert_eq!(config.version.to_string(), "1.0");
/// ```
#[derive(Debug, Deserialize, Serialize)]
pub struct TemplateConfig {
    /// Owner of the generated repositories.
    #[serde(default)]
    pub user:    String,
    /// Primary language version of generated packages.
    #[serde(default = "version::default_version", alias = "julia")]
    pub version: VersionSpec,
    /// Plugins attached to the template, in declaration order.
    #[serde(default)]
    pub plugins: Vec<PluginEntry>
}

/// Raw plugin entry before CI plugins are separated from the rest.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PluginEntry {
    /// Travis CI settings.
    TravisCi(TravisCi),
    /// AppVeyor settings.
    #[serde(rename = "appveyor")]
    AppVeyor(AppVeyor),
    /// Cirrus CI settings.
    CirrusCi(CirrusCi),
    /// GitLab CI settings.
    #[serde(rename = "gitlab_ci")]
    GitLabCi(GitLabCi),
    /// Drone CI settings.
    DroneCi(DroneCi),
    /// Codecov coverage reporting.
    Codecov(CoverageReporter),
    /// Coveralls coverage reporting.
    Coveralls(CoverageReporter),
    /// Documentation generation.
    Documenter(Documenter)
}

/// Coverage reporter entry. Reporters accept no settings.
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CoverageReporter {}

/// Documentation plugin settings.
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Documenter {
    /// CI service the documentation is deployed from.
    pub deploy: DocsDeploy
}

impl PluginEntry {
    /// Kind this entry registers as for sibling queries.
    pub fn kind(&self) -> PluginKind {
        match self {
            Self::TravisCi(_) => PluginKind::TravisCi,
            Self::AppVeyor(_) => PluginKind::AppVeyor,
            Self::CirrusCi(_) => PluginKind::CirrusCi,
            Self::GitLabCi(_) => PluginKind::GitLabCi,
            Self::DroneCi(_) => PluginKind::DroneCi,
            Self::Codecov(_) => PluginKind::Codecov,
            Self::Coveralls(_) => PluginKind::Coveralls,
            Self::Documenter(documenter) => PluginKind::Documenter(documenter.deploy)
        }
    }

    /// See [`PluginKind::is_ci`].
    pub fn is_ci(&self) -> bool {
        self.kind().is_ci()
    }

    /// See [`PluginKind::needs_username`].
    pub fn needs_username(&self) -> bool {
        self.kind().needs_username()
    }

    /// Returns the CI plugin carried by this entry, if any.
    pub fn into_ci(self) -> Option<CiPlugin> {
        match self {
            Self::TravisCi(plugin) => Some(CiPlugin::TravisCi(plugin)),
            Self::AppVeyor(plugin) => Some(CiPlugin::AppVeyor(plugin)),
            Self::CirrusCi(plugin) => Some(CiPlugin::CirrusCi(plugin)),
            Self::GitLabCi(plugin) => Some(CiPlugin::GitLabCi(plugin)),
            Self::DroneCi(plugin) => Some(CiPlugin::DroneCi(plugin)),
            Self::Codecov(_) | Self::Coveralls(_) | Self::Documenter(_) => None
        }
    }
}
