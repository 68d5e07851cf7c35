//! In-crate test double for [`CommandRunner`].

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::command::CommandSpec;
use crate::runner::{CommandResult, CommandRunner, RunError};

/// Scripted response for the next executed command.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Exit(i32),
    Missing,
}

/// Records every executed command and answers from a script.
///
/// Commands beyond the end of the script exit successfully.
#[derive(Debug, Default)]
pub(crate) struct ScriptedRunner {
    replies: RefCell<VecDeque<Reply>>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub(crate) fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().collect()),
            calls: RefCell::default(),
        }
    }

    pub(crate) fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    pub(crate) fn argvs(&self) -> Vec<Vec<String>> {
        self.calls.borrow().iter().map(CommandSpec::argv).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult, RunError> {
        self.calls.borrow_mut().push(spec.clone());

        let reply = self.replies.borrow_mut().pop_front().unwrap_or(Reply::Exit(0));
        let code = match reply {
            Reply::Exit(code) => code,
            Reply::Missing => {
                return Err(RunError::NotFound {
                    program: spec.program.clone(),
                })
            }
        };

        let captured = |text: &str| spec.capture.then(|| text.to_string());
        Ok(CommandResult {
            code: Some(code),
            stdout: captured(""),
            stderr: captured(""),
        })
    }
}

pub(crate) fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| (*s).to_string()).collect()
}
