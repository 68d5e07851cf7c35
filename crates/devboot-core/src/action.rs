use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// A named bootstrap routine selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    InitNx,
    InitPythonEnv,
    InstallCustomPyGenerator,
    InstallPreCommit,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Self::InitNx,
        Self::InitPythonEnv,
        Self::InstallCustomPyGenerator,
        Self::InstallPreCommit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitNx => "init_nx",
            Self::InitPythonEnv => "init_python_env",
            Self::InstallCustomPyGenerator => "install_custom_py_generator",
            Self::InstallPreCommit => "install_pre_commit",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ActionParseError {
    #[error("unknown action '{0}'")]
    Unknown(String),
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == normalized)
            .ok_or_else(|| ActionParseError::Unknown(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        for action in Action::ALL {
            let parsed = Action::from_str(action.as_str()).expect("canonical name should parse");
            assert_eq!(parsed, action);
        }
    }

    #[test]
    fn accepts_hyphenated_alias() {
        let action = Action::from_str("install-pre-commit").expect("alias should parse");
        assert_eq!(action, Action::InstallPreCommit);
    }

    #[test]
    fn rejects_unknown_action() {
        let err = Action::from_str("deploy").expect_err("must fail");
        assert!(matches!(err, ActionParseError::Unknown(ref name) if name == "deploy"));
        assert_eq!(err.to_string(), "unknown action 'deploy'");
    }
}
