// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Version identifiers and the canonical version sets fed to CI matrices.
//!
//! Every CI provider renders one build per entry of a version set. The set is
//! the package's primary language version merged with a list of extra
//! versions, each reduced to its `major.minor` display form. Free-form labels
//! such as `nightly` pass through untouched.
//!
//! Sorting is a plain string comparison on the canonical form. This keeps the
//! output stable for existing templates, at the cost of ordering `1.10`
//! before `1.9`.

use std::{collections::BTreeSet, fmt};

use semver::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Versions that CI matrices mark as allowed to fail.
pub const ALLOWED_FAILURES: &[&str] = &["1.3", "nightly"];

/// Extra versions tested by providers that support nightly builds.
pub const DEFAULT_CI_VERSIONS: &[&str] = &["1.0", "1.5", "nightly"];

/// Extra versions tested by providers without nightly images.
pub const DEFAULT_CI_VERSIONS_NO_NIGHTLY: &[&str] = &["1.0", "1.5"];

/// A language version as written in a template.
///
/// Structured versions carry the full semantic triple; anything that does
/// not parse as one is kept verbatim as a label.
///
/// # Examples
///
/// ```
/// use pkgci::VersionSpec;
///
/// assert_eq!(VersionSpec::from("1.4.2").to_string(), "1.4");
/// assert_eq!(VersionSpec::from("nightly").to_string(), "nightly");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionSpec {
    /// Parsed `major.minor.patch` version, optionally with pre-release and
    /// build metadata.
    Semver(Version),
    /// Opaque label such as `nightly` or an already-canonical `1.3`.
    Label(String)
}

impl VersionSpec {
    /// Returns the canonical display string for this version.
    ///
    /// Equivalent to [`format_version`].
    pub fn canonical(&self) -> String {
        format_version(self)
    }
}

/// Primary version assumed when a template does not declare one.
pub fn default_version() -> VersionSpec {
    VersionSpec::Semver(Version::new(1, 0, 0))
}

/// Converts one of the static default tables into owned version specs.
pub fn version_table(table: &[&str]) -> Vec<VersionSpec> {
    table.iter().copied().map(VersionSpec::from).collect()
}

impl From<Version> for VersionSpec {
    fn from(version: Version) -> Self {
        Self::Semver(version)
    }
}

impl From<&str> for VersionSpec {
    fn from(value: &str) -> Self {
        match Version::parse(value) {
            Ok(version) => Self::Semver(version),
            Err(_) => Self::Label(value.to_owned())
        }
    }
}

impl From<String> for VersionSpec {
    fn from(value: String) -> Self {
        match Version::parse(&value) {
            Ok(version) => Self::Semver(version),
            Err(_) => Self::Label(value)
        }
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Semver(version) => write!(f, "{}.{}", version.major, version.minor),
            Self::Label(label) => f.write_str(label)
        }
    }
}

impl Serialize for VersionSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        match self {
            Self::Semver(version) => serializer.collect_str(version),
            Self::Label(label) => serializer.serialize_str(label)
        }
    }
}

impl<'de> Deserialize<'de> for VersionSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>
    {
        deserializer.deserialize_str(VersionVisitor)
    }
}

struct VersionVisitor;

impl de::Visitor<'_> for VersionVisitor {
    type Value = VersionSpec;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a version string such as \"1.4.2\" or \"nightly\"")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error
    {
        Ok(VersionSpec::from(value))
    }
}

/// Normalizes a version into its canonical display string.
///
/// Structured versions become `"{major}.{minor}"`; patch, pre-release and
/// build metadata are dropped. Labels are returned unchanged.
pub fn format_version(version: &VersionSpec) -> String {
    version.to_string()
}

/// Merges the primary version with extra versions into a deduplicated,
/// ascending set of canonical strings.
///
/// # Examples
///
/// ```
/// use pkgci::{VersionSpec, collect_versions};
///
/// let primary = VersionSpec::from("1.0.0");
/// let extras = [VersionSpec::from("1.0"), VersionSpec::from("nightly")];
/// assert_eq!(collect_versions(&primary, &extras), ["1.0", "nightly"]);
/// ```
pub fn collect_versions(primary: &VersionSpec, extra_versions: &[VersionSpec]) -> Vec<String> {
    let unique: BTreeSet<String> = std::iter::once(primary)
        .chain(extra_versions)
        .map(format_version)
        .collect();
    unique.into_iter().collect()
}

/// Returns the members of `versions` that appear in [`ALLOWED_FAILURES`],
/// keeping the order of `versions`.
pub fn allowed_failures(versions: &[String]) -> Vec<String> {
    versions
        .iter()
        .filter(|version| ALLOWED_FAILURES.contains(&version.as_str()))
        .cloned()
        .collect()
}
