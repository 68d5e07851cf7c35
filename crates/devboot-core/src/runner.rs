use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::command::CommandSpec;

/// The captured outcome of one external process invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("command not found: '{program}'. Please ensure it is installed and in your PATH")]
    NotFound { program: String },

    #[error("failed to start command '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("command '{argv}' failed with {}", exit_label(.code))]
    Failed {
        description: String,
        argv: String,
        code: Option<i32>,
        stdout: Option<String>,
        stderr: Option<String>,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "termination by signal".to_string(),
    }
}

/// Executes external processes on behalf of the bootstrap routines.
pub trait CommandRunner {
    /// Spawns the process described by `spec` and waits for it.
    ///
    /// Implementations only report failures to start the process; the exit
    /// status is interpreted by [`CommandRunner::run`].
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult, RunError>;

    /// Runs `spec` and converts a nonzero exit status into [`RunError::Failed`]
    /// unless the command is unchecked.
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult, RunError> {
        if spec.description.is_empty() {
            info!("executing: {}", spec);
        } else {
            info!("executing: {} {}", spec.description, spec);
        }
        let result = match self.execute(spec) {
            Ok(result) => result,
            Err(e) => {
                warn!("{e}");
                return Err(e);
            }
        };

        if result.success() || !spec.check {
            if let Some(stdout) = result.stdout.as_deref() {
                info!("{}", stdout.trim_end());
            }
            if !result.success() {
                debug!("ignoring {} from unchecked command '{}'", exit_label(&result.code), spec);
            }
            return Ok(result);
        }

        warn!(
            description = %spec.description,
            stdout = result.stdout.as_deref().unwrap_or_default(),
            stderr = result.stderr.as_deref().unwrap_or_default(),
            "command '{}' failed with {}",
            spec,
            exit_label(&result.code)
        );

        Err(RunError::Failed {
            description: spec.description.clone(),
            argv: spec.to_string(),
            code: result.code,
            stdout: result.stdout,
            stderr: result.stderr,
        })
    }

    /// Reports whether `spec` runs to a zero exit status.
    ///
    /// Used as an idempotency check: a missing executable counts as absent.
    fn probe(&self, spec: &CommandSpec) -> bool {
        match self.run(spec) {
            Ok(_) => true,
            Err(e) => {
                debug!("probe '{}' failed: {}", spec, e);
                false
            }
        }
    }
}

/// Runs commands as real child processes rooted at the monorepo.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    working_dir: PathBuf,
    search_path: Option<OsString>,
}

impl SystemRunner {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            search_path: None,
        }
    }

    /// Overrides the `PATH` used to locate executables and passed to children.
    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }
}

impl CommandRunner for SystemRunner {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult, RunError> {
        // Spawn reports a missing cwd as NotFound, which would blame the program.
        if !self.working_dir.is_dir() {
            return Err(RunError::Spawn {
                program: spec.program.clone(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    format!(
                        "working directory '{}' does not exist",
                        self.working_dir.display()
                    ),
                ),
            });
        }

        let mut command = Command::new(&spec.program);
        command.args(&spec.args).current_dir(&self.working_dir);
        if let Some(path) = &self.search_path {
            command.env("PATH", path);
        }

        let spawn_error = |source: io::Error| {
            if source.kind() == io::ErrorKind::NotFound {
                RunError::NotFound {
                    program: spec.program.clone(),
                }
            } else {
                RunError::Spawn {
                    program: spec.program.clone(),
                    source,
                }
            }
        };

        if spec.capture {
            let output = command.output().map_err(spawn_error)?;
            Ok(CommandResult {
                code: output.status.code(),
                stdout: Some(String::from_utf8_lossy(&output.stdout).into_owned()),
                stderr: Some(String::from_utf8_lossy(&output.stderr).into_owned()),
            })
        } else {
            let status = command.status().map_err(spawn_error)?;
            Ok(CommandResult {
                code: status.code(),
                stdout: None,
                stderr: None,
            })
        }
    }
}
