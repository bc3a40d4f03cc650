//! Execution orchestration: parameter application, staging, delegation

use std::io::Write;
use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::{debug, error, info};

use crate::config::{Config, KEY_WORKSPACE};
use crate::error::{HarnessError, HarnessResult};
use crate::feature::FeatureTemplate;
use crate::runner::{BehatRunner, RunResult};

/// Runs one substituted feature file through the external runner.
///
/// Holds a single last-result slot, overwritten by each execution.
/// Overlapping executions need separate service instances.
pub struct ExecutionService {
    runner: BehatRunner,
    workspace: Option<PathBuf>,
    last: Option<RunResult>,
}

impl ExecutionService {
    pub fn new(runner: BehatRunner, workspace: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            workspace: Some(workspace.into()),
            last: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            runner: BehatRunner::from_config(config),
            workspace: config.get(KEY_WORKSPACE).map(PathBuf::from),
            last: None,
        }
    }

    /// Apply `params` to the template, stage the substituted text in the
    /// workspace, and hand the staged file to the runner.
    ///
    /// The staged file is uniquely named, carries the `.feature`
    /// extension and 0755 permissions, and is removed again on every
    /// exit path.
    pub fn execute(
        &mut self,
        template: &mut FeatureTemplate,
        params: &IndexMap<String, String>,
    ) -> HarnessResult<RunResult> {
        for (name, value) in params {
            debug!("Applying parameter {}={}", name, value);
            template.apply(name, value);
        }

        let workspace = self
            .workspace
            .as_deref()
            .filter(|dir| dir.is_dir())
            .ok_or_else(|| {
                HarnessError::MissingWorkspace(self.workspace.clone().unwrap_or_default())
            })?;

        let mut staged = tempfile::Builder::new()
            .prefix(&format!("{}-", template.name()))
            .suffix(".feature")
            .tempfile_in(workspace)?;
        staged.write_all(template.contents().as_bytes())?;
        staged.flush()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(staged.path(), std::fs::Permissions::from_mode(0o755))?;
        }

        info!("Staged {} at {}", template.name(), staged.path().display());

        let result = self.runner.run(staged.path())?;
        match (result.failed, result.steps) {
            _ if result.success => info!("✓ {} ({})", template.name(), result.elapsed),
            (Some(failed), Some(steps)) => {
                error!("✗ {} - {}/{} steps failed", template.name(), failed, steps)
            }
            _ => error!("✗ {} - summary not recognized", template.name()),
        }

        self.last = Some(result.clone());
        Ok(result)
    }

    /// Result of the most recent execution, if any.
    pub fn last_result(&self) -> Option<&RunResult> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_workspace_is_rejected() {
        let mut service = ExecutionService::from_config(&Config::default());
        let mut template = FeatureTemplate::from_text("t", "Feature: x\n");
        let err = service.execute(&mut template, &IndexMap::new()).unwrap_err();
        assert!(matches!(err, HarnessError::MissingWorkspace(_)));
    }

    #[test]
    fn nonexistent_workspace_is_rejected() {
        let runner = BehatRunner::new("behat", None);
        let mut service = ExecutionService::new(runner, "/nonexistent/workspace");
        let mut template = FeatureTemplate::from_text("t", "Feature: x\n");
        let err = service.execute(&mut template, &IndexMap::new()).unwrap_err();
        assert!(matches!(err, HarnessError::MissingWorkspace(_)));
    }

    #[test]
    fn workspace_must_be_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let runner = BehatRunner::new("behat", None);
        let mut service = ExecutionService::new(runner, &file);
        let mut template = FeatureTemplate::from_text("t", "Feature: x\n");
        let err = service.execute(&mut template, &IndexMap::new()).unwrap_err();
        assert!(matches!(err, HarnessError::MissingWorkspace(_)));
    }

    #[test]
    fn no_result_before_first_execution() {
        let service = ExecutionService::from_config(&Config::default());
        assert!(service.last_result().is_none());
    }
}
