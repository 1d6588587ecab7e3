// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Travis CI configuration and view derivation.
//!
//! Travis is the only provider whose view carries an explicit job list. The
//! default matrix (every version on every enabled OS, 64-bit) is expanded by
//! the template; extra 32-bit and ARM cells are listed here as [`Job`]s.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    badge::Badge,
    ci::default_file,
    plugin::{DocsDeploy, PackageContext, PluginKind},
    version::{self, DEFAULT_CI_VERSIONS, VersionSpec}
};

const LINUX: &str = "linux";
const OSX: &str = "osx";
const WINDOWS: &str = "windows";
const ARCH_X86: &str = "x86";
const ARCH_ARM64: &str = "arm64";

/// Settings of the Travis CI plugin.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TravisCi {
    /// Template rendered into `.travis.yml`.
    pub file:           PathBuf,
    /// Test on Linux.
    pub linux:          bool,
    /// Test on macOS.
    pub osx:            bool,
    /// Test on Windows.
    pub windows:        bool,
    /// Add 32-bit jobs on Linux and Windows.
    pub x86:            bool,
    /// Add ARM64 jobs on Linux.
    pub arm64:          bool,
    /// Upload coverage when a coverage reporter is attached.
    pub coverage:       bool,
    /// Versions tested besides the package's own.
    pub extra_versions: Vec<VersionSpec>
}

impl Default for TravisCi {
    fn default() -> Self {
        Self {
            file:           default_file("travis.yml"),
            linux:          true,
            osx:            true,
            windows:        true,
            x86:            false,
            arm64:          false,
            coverage:       true,
            extra_versions: version::version_table(DEFAULT_CI_VERSIONS)
        }
    }
}

/// One extra cell of the Travis build matrix.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Job {
    /// Canonical language version.
    #[serde(rename = "JULIA")]
    pub version: String,
    /// Operating system.
    #[serde(rename = "OS")]
    pub os:      &'static str,
    /// CPU architecture.
    #[serde(rename = "ARCH")]
    pub arch:    &'static str
}

/// Data handed to the `.travis.yml` template.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TravisView {
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
    /// `HAS_DOCUMENTER`: deploy documentation from this service.
    pub has_documenter:     bool,
    /// `HAS_JOBS`: whether a `jobs` section is emitted.
    pub has_jobs:           bool,
    /// `JOBS`: extra matrix entries beyond the default 64-bit builds.
    pub jobs:               Vec<Job>,
    /// `OS`: operating systems of the default matrix.
    pub os:                 Vec<&'static str>,
    /// `PKG`: package name without the `.jl` suffix.
    pub pkg:                String,
    /// `USER`: owner of the repository.
    pub user:               String,
    /// `VERSIONS`: canonical versions to test.
    pub versions:           Vec<String>
}

impl TravisCi {
    /// Path of the rendered file inside the package.
    pub const DESTINATION: &'static str = ".travis.yml";

    /// Build status badge.
    pub const BADGE: Badge = Badge::new(
        "Build Status",
        "https://travis-ci.com/{{{USER}}}/{{{PKG}}}.jl.svg?branch=master",
        "https://travis-ci.com/{{{USER}}}/{{{PKG}}}.jl"
    );

    /// Operating systems enabled for the default matrix, in a fixed order.
    pub fn operating_systems(&self) -> Vec<&'static str> {
        [(self.linux, LINUX), (self.osx, OSX), (self.windows, WINDOWS)]
            .into_iter()
            .filter_map(|(enabled, os)| enabled.then_some(os))
            .collect()
    }

    /// Expands the 32-bit and ARM flags into explicit jobs.
    ///
    /// 32-bit jobs cover every version on Linux and Windows when those are
    /// enabled. ARM jobs always run on Linux.
    pub fn jobs(&self, versions: &[String]) -> Vec<Job> {
        let mut jobs = Vec::new();

        if self.x86 {
            for version in versions {
                for os in [(self.linux, LINUX), (self.windows, WINDOWS)]
                    .into_iter()
                    .filter_map(|(enabled, os)| enabled.then_some(os))
                {
                    jobs.push(Job {
                        version: version.clone(),
                        os,
                        arch: ARCH_X86
                    });
                }
            }
        }

        if self.arm64 {
            jobs.extend(versions.iter().map(|version| Job {
                version: version.clone(),
                os:      LINUX,
                arch:    ARCH_ARM64
            }));
        }

        jobs
    }

    /// Derives the template view for `pkg`.
    pub fn view(&self, context: &PackageContext<'_>, pkg: &str) -> TravisView {
        let versions = version::collect_versions(context.version, &self.extra_versions);
        let allow_failures = version::allowed_failures(&versions);
        let jobs = self.jobs(&versions);
        let has_documenter = context.has_plugin(PluginKind::Documenter(DocsDeploy::TravisCi));

        TravisView {
            has_allow_failures: !allow_failures.is_empty(),
            allow_failures,
            has_codecov: self.coverage && context.has_plugin(PluginKind::Codecov),
            has_coverage: self.coverage && context.has_coverage_plugin(),
            has_coveralls: self.coverage && context.has_plugin(PluginKind::Coveralls),
            has_documenter,
            has_jobs: !jobs.is_empty() || has_documenter,
            jobs,
            os: self.operating_systems(),
            pkg: pkg.to_owned(),
            user: context.user.to_owned(),
            versions
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    fn job(version: &str, os: &'static str, arch: &'static str) -> Job {
        Job {
            version: version.to_owned(),
            os,
            arch
        }
    }

    #[test]
    fn defaults_enable_all_operating_systems() {
        let plugin = TravisCi::default();
        assert_eq!(plugin.operating_systems(), ["linux", "osx", "windows"]);
        assert_eq!(plugin.file, PathBuf::from("templates/travis.yml"));
    }

    #[test]
    fn operating_systems_follow_flags() {
        let plugin = TravisCi {
            osx: false,
            ..TravisCi::default()
        };
        assert_eq!(plugin.operating_systems(), ["linux", "windows"]);
    }

    #[test]
    fn x86_jobs_cover_linux_and_windows_only() {
        let plugin = TravisCi {
            x86: true,
            osx: false,
            ..TravisCi::default()
        };

        let jobs = plugin.jobs(&versions(&["1.0", "1.4"]));
        assert_eq!(
            jobs,
            [
                job("1.0", "linux", "x86"),
                job("1.0", "windows", "x86"),
                job("1.4", "linux", "x86"),
                job("1.4", "windows", "x86")
            ]
        );
    }

    #[test]
    fn x86_jobs_skip_disabled_windows() {
        let plugin = TravisCi {
            x86: true,
            windows: false,
            ..TravisCi::default()
        };

        let jobs = plugin.jobs(&versions(&["1.0"]));
        assert_eq!(jobs, [job("1.0", "linux", "x86")]);
    }

    #[test]
    fn arm_jobs_follow_x86_jobs() {
        let plugin = TravisCi {
            x86: true,
            arm64: true,
            windows: false,
            ..TravisCi::default()
        };

        let jobs = plugin.jobs(&versions(&["1.0", "nightly"]));
        assert_eq!(
            jobs,
            [
                job("1.0", "linux", "x86"),
                job("nightly", "linux", "x86"),
                job("1.0", "linux", "arm64"),
                job("nightly", "linux", "arm64")
            ]
        );
    }

    #[test]
    fn no_architecture_flags_means_no_jobs() {
        assert!(TravisCi::default().jobs(&versions(&["1.0"])).is_empty());
    }

    #[test]
    fn documenter_forces_a_job_section() {
        let version = VersionSpec::from("1.0.0");
        let siblings = vec![PluginKind::Documenter(DocsDeploy::TravisCi)];
        let context = PackageContext::new("octocat", &version, &siblings);

        let view = TravisCi::default().view(&context, "Example");
        assert!(view.jobs.is_empty());
        assert!(view.has_jobs);
        assert!(view.has_documenter);
    }

    #[test]
    fn documenter_for_another_provider_is_ignored() {
        let version = VersionSpec::from("1.0.0");
        let siblings = vec![PluginKind::Documenter(DocsDeploy::GitLabCi)];
        let context = PackageContext::new("octocat", &version, &siblings);

        let view = TravisCi::default().view(&context, "Example");
        assert!(!view.has_jobs);
        assert!(!view.has_documenter);
    }

    #[test]
    fn view_combines_versions_and_allow_failures() {
        let version = VersionSpec::from("1.3.1");
        let siblings = vec![PluginKind::Codecov];
        let context = PackageContext::new("octocat", &version, &siblings);

        let view = TravisCi::default().view(&context, "Example");
        assert_eq!(view.versions, ["1.0", "1.3", "1.5", "nightly"]);
        assert_eq!(view.allow_failures, ["1.3", "nightly"]);
        assert!(view.has_allow_failures);
        assert!(view.has_codecov);
        assert!(view.has_coverage);
        assert!(!view.has_coveralls);
        assert_eq!(view.pkg, "Example");
        assert_eq!(view.user, "octocat");
    }

    #[test]
    fn coverage_flag_gates_coverage_fields() {
        let version = VersionSpec::from("1.0.0");
        let siblings = vec![PluginKind::Codecov, PluginKind::Coveralls];
        let context = PackageContext::new("octocat", &version, &siblings);
        let plugin = TravisCi {
            coverage: false,
            ..TravisCi::default()
        };

        let view = plugin.view(&context, "Example");
        assert!(!view.has_codecov);
        assert!(!view.has_coverage);
        assert!(!view.has_coveralls);
    }

    #[test]
    fn view_serializes_template_keys() {
        let version = VersionSpec::from("1.0.0");
        let siblings: Vec<PluginKind> = Vec::new();
        let context = PackageContext::new("octocat", &version, &siblings);
        let plugin = TravisCi {
            x86: true,
            osx: false,
            windows: false,
            extra_versions: Vec::new(),
            ..TravisCi::default()
        };

        let value = serde_json::to_value(plugin.view(&context, "Example"))
            .expect("serialization succeeds");
        let keys: Vec<&str> = value
            .as_object()
            .expect("view is an object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            [
                "ALLOW_FAILURES",
                "HAS_ALLOW_FAILURES",
                "HAS_CODECOV",
                "HAS_COVERAGE",
                "HAS_COVERALLS",
                "HAS_DOCUMENTER",
                "HAS_JOBS",
                "JOBS",
                "OS",
                "PKG",
                "USER",
                "VERSIONS"
            ]
        );
        assert_eq!(
            value["JOBS"],
            serde_json::json!([{ "JULIA": "1.0", "OS": "linux", "ARCH": "x86" }])
        );
    }

    #[test]
    fn deserializes_partial_settings() {
        let plugin: TravisCi = serde_yaml::from_str("x86: true\nextra_versions: [\"1.2\"]")
            .expect("valid settings");
        assert!(plugin.x86);
        assert!(plugin.linux);
        assert_eq!(plugin.extra_versions, [VersionSpec::from("1.2")]);
    }

    #[test]
    fn rejects_unknown_settings() {
        let error = serde_yaml::from_str::<TravisCi>("arm: true").unwrap_err();
        assert!(error.to_string().contains("unknown field"));
    }
}
