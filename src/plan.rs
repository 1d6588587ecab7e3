//! Transformation logic that turns a template document into render plans.
//!
//! A [`Template`] is the validated form of a [`TemplateConfig`]: CI plugins
//! are split from the supporting plugins, which only matter as siblings. A
//! [`RenderPlan`] pairs every CI plugin with its template source, output
//! destination, badges and view for one concrete package.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf}
};

use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    badge::Badge,
    ci::{CiPlugin, View},
    config::TemplateConfig,
    error::{self, Error},
    plugin::{PackageContext, PluginKind},
    version::{self, VersionSpec}
};

/// Package names must be valid identifiers once the `.jl` suffix is removed.
const PACKAGE_NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";
const PACKAGE_SUFFIX: &str = ".jl";

/// Validated template ready to produce render plans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Owner of the generated repositories, trimmed.
    pub user:     String,
    /// Primary language version.
    pub version:  VersionSpec,
    /// CI plugins in declaration order.
    pub plugins:  Vec<CiPlugin>,
    /// Kinds of every attached plugin, CI plugins included.
    pub siblings: Vec<PluginKind>
}

impl Template {
    /// Borrowed context handed to view builders.
    pub fn context(&self) -> PackageContext<'_> {
        PackageContext::new(&self.user, &self.version, &self.siblings)
    }
}

/// Everything the renderer needs to produce one CI file.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RenderedPlugin {
    /// Plugin kind.
    pub kind:        PluginKind,
    /// Template rendered with the view.
    pub source:      PathBuf,
    /// Output path relative to the package root.
    pub destination: String,
    /// README badges contributed by the plugin.
    pub badges:      Vec<Badge>,
    /// Data substituted into the template.
    pub view:        View
}

/// Render instructions for every CI plugin of a package.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    /// Package name without the `.jl` suffix.
    pub package: String,
    /// Owner of the repository.
    pub user:    String,
    /// Canonical primary version.
    pub version: String,
    /// One entry per CI plugin, in declaration order.
    pub plugins: Vec<RenderedPlugin>
}

impl RenderPlan {
    /// Badges of every rendered CI plugin, in plugin order.
    pub fn ci_badges(&self) -> Vec<&Badge> {
        self.plugins
            .iter()
            .flat_map(|plugin| plugin.badges.iter())
            .collect()
    }
}

/// Loads a template from the provided YAML document path.
///
/// # Errors
///
/// Returns an [`Error`] when the file cannot be read, the YAML cannot be
/// deserialized, or the template violates invariants.
pub fn load_template(path: &Path) -> Result<Template, Error> {
    debug!("Reading template from {}", path.display());
    let contents = fs::read_to_string(path).map_err(|source| error::io_error(path, source))?;
    parse_template(&contents)
}

/// Parses a template from the provided YAML document string.
///
/// # Errors
///
/// Propagates [`Error::Parse`](Error::Parse) when the YAML cannot be decoded
/// and [`Error::Validation`](Error::Validation) when a CI plugin is declared
/// twice or a required username is missing.
pub fn parse_template(contents: &str) -> Result<Template, Error> {
    let config: TemplateConfig = serde_yaml::from_str(contents)?;
    normalize_template(config)
}

fn normalize_template(config: TemplateConfig) -> Result<Template, Error> {
    let user = config.user.trim().to_owned();
    let siblings: Vec<PluginKind> = config.plugins.iter().map(|entry| entry.kind()).collect();

    if user.is_empty()
        && let Some(kind) = siblings.iter().find(|kind| kind.needs_username())
    {
        return Err(Error::validation(format!(
            "user is required by plugin '{}'",
            kind.name()
        )));
    }

    let mut seen = HashSet::with_capacity(siblings.len());
    for kind in siblings.iter().filter(|kind| kind.is_ci()) {
        if !seen.insert(*kind) {
            return Err(Error::validation(format!(
                "duplicate plugin '{}'",
                kind.name()
            )));
        }
    }

    let plugins: Vec<CiPlugin> = config
        .plugins
        .into_iter()
        .filter_map(|entry| entry.into_ci())
        .collect();
    debug!(
        "Normalized template with {} CI plugins and {} siblings",
        plugins.len(),
        siblings.len()
    );

    Ok(Template {
        user,
        version: config.version,
        plugins,
        siblings
    })
}

/// Strips an optional `.jl` suffix and validates the remaining name.
///
/// # Errors
///
/// Returns [`Error::Validation`](Error::Validation) when the name is not a
/// valid identifier.
pub fn normalize_package_name(name: &str) -> Result<String, Error> {
    let trimmed = name.trim();
    let stem = trimmed.strip_suffix(PACKAGE_SUFFIX).unwrap_or(trimmed);

    let pattern = Regex::new(PACKAGE_NAME_PATTERN)
        .map_err(|e| Error::validation(format!("invalid package name pattern: {e}")))?;
    if !pattern.is_match(stem) {
        return Err(Error::validation(format!(
            "package name '{name}' is not a valid identifier"
        )));
    }

    Ok(stem.to_owned())
}

/// Builds the render plan of `template` for the package `name`.
///
/// Views are independent of each other and are derived in parallel.
///
/// # Errors
///
/// Returns [`Error::Validation`](Error::Validation) when `name` is not a
/// valid package name.
///
/// # Example
///
/// ```
/// use pkgci::{build_plan, parse_template};
///
/// # fn main() -> Result<(), pkgci::Error> {
/// let template = parse_template("user: octocat\nplugins:\n  - type: appveyor\n")?;
/// let plan = build_plan(&template, "Example.jl")?;
/// assert_eq!(plan.package, "Example");
/// assert_eq!(plan.plugins[0].destination, ".appveyor.yml");
/// # Ok(())
/// # }
/// ```
pub fn build_plan(template: &Template, name: &str) -> Result<RenderPlan, Error> {
    let package = normalize_package_name(name)?;
    let context = template.context();

    info!(
        "Building {} CI views for {}/{}",
        template.plugins.len(),
        template.user,
        package
    );

    let plugins = template
        .plugins
        .par_iter()
        .map(|plugin| RenderedPlugin {
            kind:        plugin.kind(),
            source:      plugin.source().to_path_buf(),
            destination: plugin.destination().to_owned(),
            badges:      plugin.badges(),
            view:        plugin.view(&context, &package)
        })
        .collect();

    Ok(RenderPlan {
        version: version::format_version(&template.version),
        user: template.user.clone(),
        package,
        plugins
    })
}
