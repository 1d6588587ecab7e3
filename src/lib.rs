//! Utilities for deriving continuous-integration configuration views.
//!
//! A package template attaches CI plugins (Travis CI, AppVeyor, Cirrus CI,
//! GitLab CI, Drone CI) next to supporting plugins such as coverage reporters
//! and documentation deployers. For a concrete package the library computes,
//! per CI plugin, the data an external template renderer needs: the template
//! source, the output destination, README badges and a provider-specific
//! view. Rendering the text itself is left to the caller.
//!
//! View derivation is pure and total. Errors only arise while loading and
//! validating template documents.

mod appveyor;
mod badge;
mod ci;
mod cirrus;
mod config;
mod drone;
mod error;
mod gitlab;
mod plan;
mod plugin;
mod travis;
mod version;

pub use appveyor::{AppVeyor, AppVeyorView};
pub use badge::Badge;
pub use ci::{CiPlugin, TEMPLATES_DIR, View, default_file};
pub use cirrus::{CirrusCi, CirrusView, DEFAULT_FREEBSD_IMAGE};
pub use config::{CoverageReporter, Documenter, PluginEntry, TemplateConfig};
pub use drone::{DroneCi, DroneView};
pub use error::{Error, io_error};
pub use gitlab::{GitLabCi, GitLabView};
pub use plan::{
    RenderPlan, RenderedPlugin, Template, build_plan, load_template, normalize_package_name,
    parse_template
};
pub use plugin::{DocsDeploy, PackageContext, PluginKind, SiblingQuery};
pub use travis::{Job, TravisCi, TravisView};
pub use version::{
    ALLOWED_FAILURES, DEFAULT_CI_VERSIONS, DEFAULT_CI_VERSIONS_NO_NIGHTLY, VersionSpec,
    allowed_failures, collect_versions, default_version, format_version, version_table
};
