//! Argv-style command specification.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

/// Specification for a command to execute.
///
/// All process execution goes through this type to ensure argv-style
/// invocation. Arguments are stored as discrete `OsString` elements and
/// are never concatenated into a shell string, so shell metacharacters in
/// tool arguments (file names, messages) are passed literally.
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    /// The program to execute.
    pub program: OsString,
    /// Arguments as discrete elements.
    pub args: Vec<OsString>,
    /// Optional working directory.
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a new `CommandSpec` for `program`.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory.
    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Build a `std::process::Command` from this spec.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_spec_new() {
        let cmd = CommandSpec::new("git");
        assert_eq!(cmd.program, OsString::from("git"));
        assert!(cmd.args.is_empty());
        assert!(cmd.cwd.is_none());
    }

    #[test]
    fn test_command_spec_builder_chain() {
        let cmd = CommandSpec::new("git")
            .arg("status")
            .args(["--porcelain"])
            .cwd("/workspace");

        assert_eq!(cmd.args.len(), 2);
        assert_eq!(cmd.args[0], OsString::from("status"));
        assert_eq!(cmd.args[1], OsString::from("--porcelain"));
        assert_eq!(cmd.cwd, Some(PathBuf::from("/workspace")));
    }

    #[test]
    fn test_shell_metacharacters_stored_literally() {
        let cmd = CommandSpec::new("echo")
            .arg("$(whoami)")
            .arg("a;b|c&d")
            .arg("arg with spaces");

        assert_eq!(cmd.args[0], OsString::from("$(whoami)"));
        assert_eq!(cmd.args[1], OsString::from("a;b|c&d"));
        assert_eq!(cmd.args[2], OsString::from("arg with spaces"));
    }

    #[test]
    fn test_to_command_does_not_panic() {
        let cmd = CommandSpec::new("echo").arg("hello").cwd(".");
        let _ = cmd.to_command();
    }
}
