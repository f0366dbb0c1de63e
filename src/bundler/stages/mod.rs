//! Pipeline stages, in execution order.
//!
//! Each stage borrows the immutable [`Settings`](crate::bundler::Settings)
//! and the capability it needs, and returns a `Result`; the orchestrator
//! composes them with `?` so the first failure stops the run.

mod build;
mod key;
mod keystore;
mod locate;
mod publish;
mod sign;

pub use build::build_release_artifact;
pub use key::resolve_private_key;
pub use keystore::{KeystoreStatus, provision_keystore};
pub use locate::{BuildToolsVersion, locate_signer, newest_build_tools};
pub use publish::publish;
pub use sign::sign_and_verify;
