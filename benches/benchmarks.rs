// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pkgci::{TravisCi, VersionSpec, build_plan, collect_versions, parse_template};

const TEMPLATE: &str = r#"
user: octocat
version: "1.3.1"
plugins:
  - type: travis_ci
    x86: true
    arm64: true
  - type: appveyor
    x86: true
  - type: cirrus_ci
  - type: gitlab_ci
  - type: drone_ci
    arm: true
  - type: codecov
  - type: documenter
    deploy: travis_ci
"#;

fn benchmark_parse_template(c: &mut Criterion) {
    c.bench_function("parse_template_all_providers", |b| {
        b.iter(|| parse_template(black_box(TEMPLATE)).expect("parse failed"))
    });
}

fn benchmark_build_plan(c: &mut Criterion) {
    let template = parse_template(TEMPLATE).expect("parse failed");

    c.bench_function("build_plan_all_providers", |b| {
        b.iter(|| build_plan(black_box(&template), black_box("Example")).expect("plan failed"))
    });
}

fn benchmark_collect_versions(c: &mut Criterion) {
    let primary = VersionSpec::from("1.4.2");
    let extras: Vec<VersionSpec> = (0..50)
        .map(|minor| VersionSpec::from(format!("1.{minor}.0")))
        .chain(std::iter::once(VersionSpec::from("nightly")))
        .collect();

    c.bench_function("collect_versions_50", |b| {
        b.iter(|| collect_versions(black_box(&primary), black_box(&extras)))
    });
}

fn benchmark_travis_jobs(c: &mut Criterion) {
    let plugin = TravisCi {
        x86: true,
        arm64: true,
        ..TravisCi::default()
    };
    let versions: Vec<String> = (0..20).map(|minor| format!("1.{minor}")).collect();

    c.bench_function("travis_jobs_20_versions", |b| {
        b.iter(|| black_box(plugin.jobs(black_box(&versions)).len()))
    });
}

criterion_group!(
    benches,
    benchmark_parse_template,
    benchmark_build_plan,
    benchmark_collect_versions,
    benchmark_travis_jobs
);
criterion_main!(benches);
