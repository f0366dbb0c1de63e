//! Release orchestration.
//!
//! - [`checksum`] - SHA256 of the published artifact
//! - [`orchestrator`] - the [`Bundler`] running the stages in order
//! - [`tool_detection`] - external tool lookup on the search path

mod checksum;
mod orchestrator;
pub(crate) mod tool_detection;

pub use checksum::calculate_sha256;
pub use orchestrator::{Bundler, ReleaseArtifact};
