use std::fmt::{Display, Formatter};

/// A single external process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// The executable program (e.g., "pyenv", "pnpm").
    pub program: String,
    /// The arguments to pass to the program.
    pub args: Vec<String>,
    /// Human readable label used in log lines.
    pub description: String,
    /// Treat a nonzero exit status as a failure.
    pub check: bool,
    /// Pipe stdout/stderr into the result instead of inheriting the terminal.
    pub capture: bool,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            description: String::new(),
            check: true,
            capture: false,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Accepts any exit status; only a missing executable is an error.
    pub fn unchecked(mut self) -> Self {
        self.check = false;
        self
    }

    pub fn captured(mut self) -> Self {
        self.capture = true;
        self
    }

    /// The full argument vector, program first.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl Display for CommandSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}
