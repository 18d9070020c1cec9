//! Bundle state store.
//!
//! Every task bundle owns a `bundle_status.yaml` that the whole workflow
//! reads and writes: the bundler and coder agents flip their completion
//! flags, the validation engine drives the status transitions, and the
//! external lifecycle hooks read `status`, `workflow_phase`, and the
//! `*_agent_completed` flags to decide whether to notify. This crate is
//! the only code that touches that file.
//!
//! The store is an interface ([`BundleStore`]) over a filesystem
//! implementation ([`FsBundleStore`]) so concurrent-access hardening can
//! be added later without touching call sites. Writes already go through
//! atomic temp-file + rename.

mod codec;
mod error;
mod status;
mod store;

pub use codec::{MinimalCodec, StatusCodec, YamlCodec};
pub use error::StoreError;
pub use status::{BundleState, BundleStatus};
pub use store::{BundleStore, FsBundleStore, TransitionFields};
