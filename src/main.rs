//! Command-line interface for the pkgci binary.
//!
//! The CLI loads a template document and prints render plans, README badge
//! lines, or version sets. Structured output goes to stdout as JSON; logs go
//! to stderr.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process
};

use clap::{ArgAction, Args, Parser, Subcommand};
use pkgci::{
    Error, RenderPlan, VersionSpec, allowed_failures, build_plan, collect_versions, load_template
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line interface for deriving CI configuration views.
#[derive(Debug, Parser)]
#[command(name = "pkgci", version, about = "Derive CI configuration views for package templates")]
struct Cli {
    #[command(subcommand)]
    command: Command
}

#[derive(Debug, Subcommand)]
/// Supported commands exposed by the CLI.
enum Command {
    /// Print the render plan of every CI plugin for a package.
    Plan(PlanArgs),
    /// Print the markdown CI badges of a template.
    Badges(BadgesArgs),
    /// Print the version set and allowed failures for a primary version.
    Versions(VersionsArgs)
}

#[derive(Debug, Args)]
struct PlanArgs {
    /// Path to the YAML template document.
    #[arg(long = "config", value_name = "PATH", env = "PKGCI_CONFIG")]
    config: PathBuf,

    /// Package name, with or without the `.jl` suffix.
    #[arg(long = "package", value_name = "NAME")]
    package: String,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool
}

#[derive(Debug, Args)]
struct BadgesArgs {
    /// Path to the YAML template document.
    #[arg(long = "config", value_name = "PATH", env = "PKGCI_CONFIG")]
    config: PathBuf
}

#[derive(Debug, Args)]
struct VersionsArgs {
    /// Primary version of the package.
    #[arg(long = "primary", value_name = "VERSION", default_value = "1.0.0")]
    primary: String,

    /// Additional versions to test.
    #[arg(long = "extra", value_name = "VERSION")]
    extra: Vec<String>
}

#[derive(Debug, Serialize)]
struct VersionReport {
    versions:       Vec<String>,
    allow_failures: Vec<String>
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main() {
    init_tracing();

    if let Err(error) = run() {
        eprintln!("{}", error.to_display_string());
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates errors originating from template loading and validation.
fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match cli.command {
        Command::Plan(args) => run_plan(&mut handle, &args),
        Command::Badges(args) => run_badges(&mut handle, &args.config),
        Command::Versions(args) => run_versions(&mut handle, &args)
    }
}

fn run_plan<W: Write>(writer: &mut W, args: &PlanArgs) -> Result<(), Error> {
    let template = load_template(&args.config)?;
    let plan = build_plan(&template, &args.package)?;
    info!("Rendered plan for {} with {} plugins", plan.package, plan.plugins.len());
    write_plan(writer, &plan, args.pretty)
}

fn write_plan<W: Write>(writer: &mut W, plan: &RenderPlan, pretty: bool) -> Result<(), Error> {
    if pretty {
        serde_json::to_writer_pretty(writer, plan)?;
    } else {
        serde_json::to_writer(writer, plan)?;
    }

    Ok(())
}

fn run_badges<W: Write>(writer: &mut W, config: &Path) -> Result<(), Error> {
    let template = load_template(config)?;
    for badge in template.plugins.iter().flat_map(|plugin| plugin.badges()) {
        writeln!(writer, "{badge}").map_err(Error::output)?;
    }

    Ok(())
}

fn run_versions<W: Write>(writer: &mut W, args: &VersionsArgs) -> Result<(), Error> {
    let primary = VersionSpec::from(args.primary.as_str());
    let extras: Vec<VersionSpec> = args
        .extra
        .iter()
        .map(|version| VersionSpec::from(version.as_str()))
        .collect();
    let versions = collect_versions(&primary, &extras);
    let report = VersionReport {
        allow_failures: allowed_failures(&versions),
        versions
    };

    serde_json::to_writer(writer, &report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Cursor};

    use clap::Parser;
    use tempfile::tempdir;

    use super::{Cli, Command, run_badges, run_plan, run_versions};

    const TEMPLATE: &str = r#"
user: octocat
plugins:
  - type: appveyor
    x86: true
  - type: gitlab_ci
  - type: codecov
"#;

    fn output(buffer: Cursor<Vec<u8>>) -> String {
        String::from_utf8(buffer.into_inner()).expect("invalid UTF-8")
    }

    #[test]
    fn plan_command_prints_json_plan() {
        let temp = tempdir().expect("failed to create tempdir");
        let config_path = temp.path().join("template.yaml");
        fs::write(&config_path, TEMPLATE).expect("failed to write template");

        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "plan",
            "--config",
            config_path.to_str().expect("utf8"),
            "--package",
            "Example.jl"
        ])
        .expect("failed to parse CLI");

        let args = match cli.command {
            Command::Plan(args) => args,
            other => panic!("unexpected command variant: {other:?}")
        };
        assert!(!args.pretty);

        let mut buffer = Cursor::new(Vec::new());
        run_plan(&mut buffer, &args).expect("plan succeeds");

        let value: serde_json::Value =
            serde_json::from_str(&output(buffer)).expect("plan is valid JSON");
        assert_eq!(value["package"], "Example");
        assert_eq!(value["plugins"][0]["view"]["PLATFORMS"], serde_json::json!(["x64", "x86"]));
        assert_eq!(value["plugins"][0]["view"]["HAS_CODECOV"], true);
        assert_eq!(value["plugins"][1]["destination"], ".gitlab-ci.yml");
    }

    #[test]
    fn plan_command_reports_invalid_package() {
        let temp = tempdir().expect("failed to create tempdir");
        let config_path = temp.path().join("template.yaml");
        fs::write(&config_path, TEMPLATE).expect("failed to write template");

        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "plan",
            "--config",
            config_path.to_str().expect("utf8"),
            "--package",
            "bad name"
        ])
        .expect("failed to parse CLI");

        let args = match cli.command {
            Command::Plan(args) => args,
            other => panic!("unexpected command variant: {other:?}")
        };

        let mut buffer = Cursor::new(Vec::new());
        let error = run_plan(&mut buffer, &args).expect_err("expected validation error");
        assert!(matches!(error, pkgci::Error::Validation { .. }));
    }

    #[test]
    fn badges_command_prints_markdown_lines() {
        let temp = tempdir().expect("failed to create tempdir");
        let config_path = temp.path().join("template.yaml");
        fs::write(&config_path, TEMPLATE).expect("failed to write template");

        let mut buffer = Cursor::new(Vec::new());
        run_badges(&mut buffer, &config_path).expect("badges succeed");

        let text = output(buffer);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[![Build Status](https://ci.appveyor.com/"));
        assert!(lines[2].starts_with("[![Coverage]"));
    }

    #[test]
    fn versions_command_reports_allow_failures() {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "versions",
            "--primary",
            "1.3.0",
            "--extra",
            "1.0",
            "--extra",
            "nightly"
        ])
        .expect("failed to parse CLI");

        let args = match cli.command {
            Command::Versions(args) => args,
            other => panic!("unexpected command variant: {other:?}")
        };

        let mut buffer = Cursor::new(Vec::new());
        run_versions(&mut buffer, &args).expect("versions succeed");
        assert_eq!(
            output(buffer),
            "{\"versions\":[\"1.0\",\"1.3\",\"nightly\"],\"allow_failures\":[\"1.3\",\"nightly\"]}"
        );
    }

    #[test]
    fn missing_config_file_is_reported() {
        let temp = tempdir().expect("failed to create tempdir");
        let mut buffer = Cursor::new(Vec::new());
        let error = run_badges(&mut buffer, &temp.path().join("absent.yaml"))
            .expect_err("expected io error");
        assert!(error.to_display_string().contains("failed to read template"));
    }
}
