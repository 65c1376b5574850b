//! Fetch helpers shared by the per-project checks.

use std::sync::atomic::{AtomicUsize, Ordering};

use octolint_core::model::{Process, Project};
use octolint_core::{fan_out, CheckContext, CheckError, ClientError, SpaceClient};

/// Runs `fetch` for every project with bounded concurrency.
///
/// Failures are classified per project: tolerated ones drop the project
/// from the output, fatal ones abort with the first fatal error in project
/// order.
pub(crate) fn per_project<'p, R, F>(
    ctx: &CheckContext,
    check: &str,
    projects: &'p [Project],
    fetch: F,
) -> Result<Vec<(&'p Project, R)>, CheckError>
where
    R: Send,
    F: Fn(&Project) -> Result<R, ClientError> + Sync + Send,
{
    let total = projects.len();
    let done = AtomicUsize::new(0);
    let outcomes = fan_out(ctx.concurrency(), projects, |project| {
        let outcome = fetch(project);
        let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
        ctx.reporter().progress(check, finished, total);
        outcome
    });

    let mut kept = Vec::with_capacity(total);
    for (project, outcome) in projects.iter().zip(outcomes) {
        match outcome {
            Ok(value) => kept.push((project, value)),
            Err(err) => ctx.skip_or_abort(check, &project.name, err)?,
        }
    }
    Ok(kept)
}

/// Fetches a project's deployment process.
///
/// A project without a process id or whose process no longer exists has no
/// process.
pub(crate) fn deployment_process(
    client: &dyn SpaceClient,
    project: &Project,
) -> Result<Option<Process>, ClientError> {
    let Some(id) = project
        .deployment_process_id
        .as_deref()
        .filter(|id| !id.is_empty())
    else {
        return Ok(None);
    };

    match client.deployment_process(id) {
        Err(ClientError::NotFound { .. }) => Ok(None),
        other => other,
    }
}
