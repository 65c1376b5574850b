//! Check for variables sharing a value across projects.
//!
//! # Rationale
//!
//! The same literal value configured in several projects is usually a shared
//! setting that belongs in a library variable set, where it can be changed
//! once.
//!
//! # Ignored Variables
//!
//! - empty values and non-text types (sensitive, accounts, certificates)
//! - system variables (see [`SPECIAL_VARIABLES`](crate::SPECIAL_VARIABLES))
//! - boolean literals (`true`, `false`, `yes`, `no`, any case) and integers
//!
//! # Configuration
//!
//! - `max_projects`: Maximum projects to compare (default: 0, unlimited)
//! - `max_duplicates`: Maximum pairs listed in the result (default: 0, unlimited)

use octolint_core::model::{Project, Variable, VariableSet, VariableType};
use octolint_core::{
    Category, Check, CheckConfig, CheckContext, CheckError, CheckResult, ResultExt, Severity,
};

use crate::fetch::per_project;
use crate::special_variables::is_special_variable;

/// Check id for duplicated-variables.
pub const ID: &str = "OctoLintDuplicatedVariables";

const BOOLEAN_LITERALS: &[&str] = &["true", "false", "yes", "no"];

/// Configuration for [`DuplicatedVariables`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicatedVariablesConfig {
    /// Maximum number of projects to compare; 0 means unlimited.
    pub max_projects: usize,
    /// Maximum number of pairs listed; 0 means unlimited.
    pub max_duplicates: usize,
}

impl DuplicatedVariablesConfig {
    /// Reads the options from a `[checks.OctoLintDuplicatedVariables]` table.
    #[must_use]
    pub fn from_check_config(config: &CheckConfig) -> Self {
        Self {
            max_projects: config.get_usize("max_projects", 0),
            max_duplicates: config.get_usize("max_duplicates", 0),
        }
    }
}

/// Two variables in different projects holding the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicatePair {
    /// Name of the first project.
    pub first_project: String,
    /// Name of the variable in the first project.
    pub first_variable: String,
    /// Name of the second project.
    pub second_project: String,
    /// Name of the variable in the second project.
    pub second_variable: String,
}

impl std::fmt::Display for DuplicatePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} == {}/{}",
            self.first_project, self.first_variable, self.second_project, self.second_variable
        )
    }
}

/// Flags variables duplicated between projects.
#[derive(Debug, Clone, Default)]
pub struct DuplicatedVariables {
    config: DuplicatedVariablesConfig,
}

impl DuplicatedVariables {
    /// Creates a new check with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a check with explicit settings.
    #[must_use]
    pub fn with_config(config: DuplicatedVariablesConfig) -> Self {
        Self { config }
    }
}

impl Check for DuplicatedVariables {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Finds variables with the same value in different projects"
    }

    fn category(&self) -> Category {
        Category::Organization
    }

    fn execute(&self, ctx: &CheckContext) -> Result<Option<CheckResult>, CheckError> {
        let client = ctx.client()?;

        let projects = match client
            .projects(&ctx.project_filter(self.config.max_projects))
            .missing_as_empty()
        {
            Ok(projects) => projects,
            Err(err) => return ctx.handle_error(ID, self.category(), err),
        };

        let variable_sets = per_project(ctx, ID, &projects, |project| {
            client.variable_set(&project.id).missing_as_empty()
        })?;

        let mut pairs = find_duplicates(&variable_sets);
        if pairs.is_empty() {
            return Ok(Some(CheckResult::new(
                ID,
                Severity::Ok,
                self.category(),
                "There are no duplicated variables",
            )));
        }

        if self.config.max_duplicates > 0 {
            pairs.truncate(self.config.max_duplicates);
        }

        let lines: Vec<String> = pairs.iter().map(ToString::to_string).collect();
        Ok(Some(CheckResult::new(
            ID,
            Severity::Warning,
            self.category(),
            format!(
                "The following variables are duplicated between projects. Consider moving these into library variable sets:\n{}",
                lines.join("\n")
            ),
        )))
    }
}

/// Returns every pair of non-ignorable variables with equal values in two
/// different projects.
///
/// Each unordered pair of projects is compared once. The cost is quadratic
/// in both projects and variables, which is fine for configuration-sized
/// inputs.
#[must_use]
pub fn find_duplicates(projects: &[(&Project, VariableSet)]) -> Vec<DuplicatePair> {
    let candidates: Vec<(&Project, Vec<&Variable>)> = projects
        .iter()
        .map(|(project, set)| {
            let vars = set.variables.iter().filter(|v| !is_ignorable(v)).collect();
            (*project, vars)
        })
        .collect();

    let mut pairs = Vec::new();
    for (i, (first_project, first_vars)) in candidates.iter().enumerate() {
        for (second_project, second_vars) in &candidates[i + 1..] {
            for first in first_vars {
                for second in second_vars {
                    if first.value == second.value {
                        pairs.push(DuplicatePair {
                            first_project: first_project.name.clone(),
                            first_variable: first.name.clone(),
                            second_project: second_project.name.clone(),
                            second_variable: second.name.clone(),
                        });
                    }
                }
            }
        }
    }
    pairs
}

/// True when a variable's value carries no meaningful duplication signal.
#[must_use]
pub fn is_ignorable(variable: &Variable) -> bool {
    let value = variable.value.as_str();
    value.is_empty()
        || variable.kind != VariableType::String
        || is_special_variable(&variable.name)
        || BOOLEAN_LITERALS
            .iter()
            .any(|literal| value.eq_ignore_ascii_case(literal))
        || is_integer(value)
}

/// Only values that fit a signed 64-bit integer count; decimals and
/// oversized digit strings are compared like any other text.
fn is_integer(value: &str) -> bool {
    value.parse::<i64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn project(name: &str) -> Project {
        Project {
            id: format!("Projects-{name}"),
            name: name.to_string(),
            ..Project::default()
        }
    }

    fn set(vars: Vec<Variable>) -> VariableSet {
        VariableSet {
            variables: vars,
            ..VariableSet::default()
        }
    }

    #[test]
    fn flags_equal_values_across_projects() {
        let a = project("ProjectA");
        let b = project("ProjectB");
        let input = vec![
            (&a, set(vec![Variable::text("ApiKey", "abc123")])),
            (&b, set(vec![Variable::text("ApiKey", "abc123")])),
        ];
        let pairs = find_duplicates(&input);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].to_string(), "ProjectA/ApiKey == ProjectB/ApiKey");
    }

    #[test]
    fn same_project_values_are_not_pairs() {
        let a = project("A");
        let input = vec![(
            &a,
            set(vec![
                Variable::text("One", "shared"),
                Variable::text("Two", "shared"),
            ]),
        )];
        assert!(find_duplicates(&input).is_empty());
    }

    #[test]
    fn ignorable_values() {
        for value in ["", "true", "FALSE", "Yes", "no", "8080", "-1"] {
            assert!(is_ignorable(&Variable::text("X", value)), "{value}");
        }
        for value in ["https://example.com", "nan", "2.5", "123456789012345678901234"] {
            assert!(!is_ignorable(&Variable::text("X", value)), "{value}");
        }
    }

    #[test]
    fn decimal_and_oversized_values_are_reported() {
        let a = project("Build");
        let b = project("Deploy");
        let vars = || {
            set(vec![
                Variable::text("ToolVersion", "2.5"),
                Variable::text("Big", "123456789012345678901234"),
            ])
        };
        let input = vec![(&a, vars()), (&b, vars())];
        let lines: Vec<String> = find_duplicates(&input).iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "Build/ToolVersion == Deploy/ToolVersion",
                "Build/Big == Deploy/Big",
            ]
        );
    }

    #[test]
    fn non_text_and_special_variables_are_ignored() {
        let mut secret = Variable::text("Password", "hunter2");
        secret.kind = VariableType::Sensitive;
        assert!(is_ignorable(&secret));
        assert!(is_ignorable(&Variable::text("OctopusPrintVariables", "verbose")));
    }

    #[test]
    fn ignorable_on_either_side_is_not_reported() {
        let a = project("A");
        let b = project("B");
        let mut secret = Variable::text("Secret", "value");
        secret.kind = VariableType::Sensitive;
        let input = vec![
            (&a, set(vec![Variable::text("Plain", "value")])),
            (&b, set(vec![secret])),
        ];
        assert!(find_duplicates(&input).is_empty());
    }

    #[test]
    fn symmetric_under_project_order() {
        let a = project("A");
        let b = project("B");
        let c = project("C");
        let forward = vec![
            (&a, set(vec![Variable::text("Url", "https://x"), Variable::text("Region", "eu")])),
            (&b, set(vec![Variable::text("Endpoint", "https://x")])),
            (&c, set(vec![Variable::text("Zone", "eu"), Variable::text("Host", "https://x")])),
        ];
        let mut backward = forward.clone();
        backward.reverse();

        let unordered = |pairs: Vec<DuplicatePair>| -> HashSet<Vec<(String, String)>> {
            pairs
                .into_iter()
                .map(|p| {
                    let mut ends = vec![
                        (p.first_project, p.first_variable),
                        (p.second_project, p.second_variable),
                    ];
                    ends.sort();
                    ends
                })
                .collect()
        };

        let f = unordered(find_duplicates(&forward));
        assert_eq!(f.len(), 4);
        assert_eq!(f, unordered(find_duplicates(&backward)));
    }

    #[test]
    fn config_reads_options() {
        let config = octolint_core::Config::parse(
            r"
[checks.OctoLintDuplicatedVariables]
max_projects = 50
max_duplicates = 10
",
        )
        .unwrap();
        let parsed = DuplicatedVariablesConfig::from_check_config(&config.check(ID));
        assert_eq!(
            parsed,
            DuplicatedVariablesConfig {
                max_projects: 50,
                max_duplicates: 10
            }
        );
    }
}
