//! External runner invocation and output parsing

use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{Config, KEY_COMMAND, KEY_CONFIG};
use crate::error::{HarnessError, HarnessResult};

/// Runner binary assumed when the configuration names none.
pub const DEFAULT_COMMAND: &str = "behat";

/// Structured outcome of one runner invocation.
///
/// `steps`/`passed`/`failed` are `None` when the summary line did not
/// match the expected shape; "unknown" is distinct from zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Command line the runner was invoked with.
    pub command: String,
    pub success: bool,
    /// Elapsed-time string from the runner's last output line, verbatim.
    pub elapsed: String,
    pub steps: Option<u32>,
    pub passed: Option<u32>,
    pub failed: Option<u32>,
    /// Captured but not consulted for `success`.
    pub exit_code: Option<i32>,
    /// Every captured output line, in order.
    pub output: Vec<String>,
}

/// Invokes the external runner binary against a staged feature file.
pub struct BehatRunner {
    command: String,
    config_path: Option<String>,
}

impl BehatRunner {
    pub fn new(command: impl Into<String>, config_path: Option<String>) -> Self {
        Self {
            command: command.into(),
            config_path: config_path.filter(|p| !p.is_empty()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.get_or(KEY_COMMAND, DEFAULT_COMMAND),
            config.get(KEY_CONFIG).map(str::to_string),
        )
    }

    /// Assemble the command line for one feature file.
    fn command_line(&self, feature: &Path) -> String {
        let mut line = self.command.clone();
        if let Some(config) = &self.config_path {
            line.push_str(" --config=");
            line.push_str(config);
        }
        line.push(' ');
        line.push_str(&feature.display().to_string());
        line
    }

    /// Run the external binary to completion and parse its output.
    ///
    /// Blocks until the subprocess exits; no timeout is enforced.
    pub fn run(&self, feature: &Path) -> HarnessResult<RunResult> {
        let command_line = self.command_line(feature);
        info!("Running: {}", command_line);

        // stdout and stderr share one capture file so the recorded line
        // order matches what a terminal would show.
        let mut capture = tempfile::tempfile()?;

        let mut cmd = Command::new(&self.command);
        if let Some(config) = &self.config_path {
            cmd.arg(format!("--config={config}"));
        }
        cmd.arg(feature)
            .stdin(Stdio::null())
            .stdout(Stdio::from(capture.try_clone()?))
            .stderr(Stdio::from(capture.try_clone()?));

        let status = cmd.status()?;
        debug!("Runner exited with {}", status);

        capture.seek(SeekFrom::Start(0))?;
        let mut raw = String::new();
        capture.read_to_string(&mut raw)?;
        let output: Vec<String> = raw.lines().map(str::to_string).collect();

        if output.is_empty() {
            return Err(HarnessError::EmptyOutput(command_line));
        }

        Ok(parse_output(command_line, output, status.code()))
    }
}

fn summary_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d+)\s+steps.*?(\d+)\s+passed").expect("summary pattern compiles")
    })
}

/// Fold captured output lines into a structured result.
///
/// The last line carries the elapsed time; the line before it is the
/// summary. A summary that does not match the expected shape leaves all
/// counts unset and the run is reported as failed.
fn parse_output(command: String, output: Vec<String>, exit_code: Option<i32>) -> RunResult {
    let elapsed = output.last().cloned().unwrap_or_default();
    let summary = output
        .len()
        .checked_sub(2)
        .map(|index| output[index].as_str());

    let (steps, passed) = summary.map_or((None, None), parse_summary);
    let failed = match (steps, passed) {
        (Some(steps), Some(passed)) => Some(steps.saturating_sub(passed)),
        _ => None,
    };
    let success = failed == Some(0);

    RunResult {
        command,
        success,
        elapsed,
        steps,
        passed,
        failed,
        exit_code,
        output,
    }
}

fn parse_summary(line: &str) -> (Option<u32>, Option<u32>) {
    match summary_pattern().captures(line) {
        Some(caps) => (caps[1].parse().ok(), caps[2].parse().ok()),
        None => (None, None),
    }
}
