//! Subprocess execution for bundlegate.
//!
//! Every external tool the quality gates invoke — test runners, linters,
//! type checkers, security scanners, git — goes through this crate.
//!
//! # Security Model
//!
//! All execution is argv-style via [`CommandSpec`]: arguments cross the
//! process boundary as discrete elements, never as shell strings. No
//! `sh -c` or `cmd /C` invocation happens anywhere.
//!
//! # Threading
//!
//! The interface is synchronous. [`NativeRunner`] handles timeouts with a
//! waiter thread internally; callers block until the process exits or the
//! timeout elapses.

mod command_spec;
mod error;
mod native;
mod process;

pub use command_spec::CommandSpec;
pub use error::RunnerError;
pub use native::NativeRunner;
pub use process::{ProcessOutput, ProcessRunner};
