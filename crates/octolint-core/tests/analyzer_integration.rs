//! Integration test: config file + snapshot + custom checks through the Analyzer.

use octolint_core::{
    Analyzer, Category, Check, CheckContext, CheckError, CheckResult, Config, ErrorKind,
    ProjectFilter, Severity, SnapshotClient,
};
use std::sync::Arc;

const SPACE: &str = r#"{
  "Projects": [
    {"Id": "Projects-1", "Name": "Web", "LifecycleId": "Lifecycles-1"},
    {"Id": "Projects-2", "Name": "Api", "LifecycleId": "Lifecycles-1"},
    {"Id": "Projects-3", "Name": "Legacy", "LifecycleId": "Lifecycles-1"}
  ],
  "Environments": [
    {"Id": "Environments-1", "Name": "Dev"},
    {"Id": "Environments-2", "Name": "Prod"}
  ]
}"#;

const CONFIG: &str = r#"
[analyzer]
concurrency = 3
parallelism = 2
exclude_projects = ["Legacy"]
skip = ["Disabled"]

[checks.ProjectNames]
max_projects = 0
"#;

/// Lists the project names the check is allowed to see.
struct ProjectNames;

impl Check for ProjectNames {
    fn id(&self) -> &'static str {
        "ProjectNames"
    }

    fn category(&self) -> Category {
        Category::Organization
    }

    fn execute(&self, ctx: &CheckContext) -> Result<Option<CheckResult>, CheckError> {
        let projects = ctx.client()?.projects(&ctx.project_filter(0))?;
        let names: Vec<String> = projects.into_iter().map(|p| p.name).collect();
        Ok(Some(CheckResult::new(
            self.id(),
            Severity::Ok,
            self.category(),
            names.join(","),
        )))
    }
}

/// Always reports a warning with a link.
struct EnvironmentNames;

impl Check for EnvironmentNames {
    fn id(&self) -> &'static str {
        "EnvironmentNames"
    }

    fn category(&self) -> Category {
        Category::Naming
    }

    fn execute(&self, ctx: &CheckContext) -> Result<Option<CheckResult>, CheckError> {
        let count = ctx.client()?.environments()?.len();
        Ok(Some(
            CheckResult::new(
                self.id(),
                Severity::Warning,
                self.category(),
                format!("{count} environments"),
            )
            .with_link("https://example.com/envs"),
        ))
    }
}

struct Disabled;

impl Check for Disabled {
    fn id(&self) -> &'static str {
        "Disabled"
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn execute(&self, _ctx: &CheckContext) -> Result<Option<CheckResult>, CheckError> {
        panic!("skipped checks never execute");
    }
}

/// Reads a process that does not exist without tolerating the miss.
struct StrictProcess;

impl Check for StrictProcess {
    fn id(&self) -> &'static str {
        "StrictProcess"
    }

    fn category(&self) -> Category {
        Category::Organization
    }

    fn execute(&self, ctx: &CheckContext) -> Result<Option<CheckResult>, CheckError> {
        ctx.client()?.deployment_process("DeploymentProcesses-404")?;
        Ok(None)
    }
}

fn analyzer() -> Analyzer {
    let config = Config::parse(CONFIG).expect("fixture config should parse");
    let client = SnapshotClient::parse(SPACE).expect("fixture snapshot should parse");

    Analyzer::builder()
        .client(Arc::new(client))
        .config(config)
        .check(ProjectNames)
        .check(EnvironmentNames)
        .check(Disabled)
        .check(StrictProcess)
        .build()
        .expect("analyzer should build")
}

#[test]
fn config_drives_selection_and_filtering() {
    let analyzer = analyzer();
    assert_eq!(analyzer.check_count(), 4);
    assert_eq!(
        analyzer.enabled_checks(),
        vec!["ProjectNames", "EnvironmentNames", "StrictProcess"]
    );
    assert_eq!(analyzer.context().concurrency(), 3);

    let report = analyzer.analyze().expect("analysis should succeed");
    assert_eq!(report.checks_run, 3);

    let names = report.result_for("ProjectNames").expect("project names ran");
    assert_eq!(names.message(), "Web,Api");
}

#[test]
fn results_are_sorted_and_failures_isolated() {
    let report = analyzer().analyze().expect("analysis should succeed");

    let ids: Vec<&str> = report.results.iter().map(CheckResult::check).collect();
    assert_eq!(ids, vec!["EnvironmentNames", "ProjectNames"]);

    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.check, "StrictProcess");
    assert_eq!(failure.kind, ErrorKind::NotFound);
    assert!(report.not_applicable.is_empty());

    let envs = report.result_for("EnvironmentNames").expect("environments ran");
    assert_eq!(envs.message(), "2 environments");
    assert_eq!(envs.link(), "https://example.com/envs");

    let counts = report.count_by_severity();
    assert_eq!(counts.ok, 1);
    assert_eq!(counts.warnings, 1);
    assert!(report.has_errors());
}

#[test]
fn builder_only_list_narrows_the_run() {
    let client = SnapshotClient::parse(SPACE).expect("fixture snapshot should parse");
    let report = Analyzer::builder()
        .client(Arc::new(client))
        .check(ProjectNames)
        .check(EnvironmentNames)
        .only(["ProjectNames"])
        .build()
        .expect("analyzer should build")
        .analyze()
        .expect("analysis should succeed");

    assert_eq!(report.checks_run, 1);
    assert_eq!(
        report.result_for("ProjectNames").map(CheckResult::message),
        Some("Web,Api,Legacy")
    );
}

#[test]
fn snapshot_client_applies_filter_limits() {
    let client = SnapshotClient::parse(SPACE).expect("fixture snapshot should parse");
    let filter = ProjectFilter {
        only: Vec::new(),
        exclude: vec!["Web".to_string()],
        max: 1,
    };

    let projects = octolint_core::SpaceClient::projects(&client, &filter).expect("projects");
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "Api");
}
