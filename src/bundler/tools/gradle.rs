//! Gradle release build.

use super::{ArtifactBuilder, process};
use crate::bundler::{
    builder::tool_detection,
    error::{Error, Result},
};
use async_trait::async_trait;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};
use tokio::process::Command;

#[cfg(windows)]
const WRAPPER: &str = "gradlew.bat";
#[cfg(not(windows))]
const WRAPPER: &str = "gradlew";

/// Release task, skipped clean task and daemon flag.
const RELEASE_ARGS: [&str; 4] = ["assembleRelease", "-x", "clean", "--no-daemon"];

/// Runs the project's Gradle wrapper, or a `gradle` on the search path when
/// the project has no wrapper.
#[derive(Debug, Clone, Default)]
pub struct GradleWrapper {
    search_path: Option<OsString>,
}

impl GradleWrapper {
    /// Creates a builder resolving a fallback `gradle` against `search_path`.
    pub fn new(search_path: Option<OsString>) -> Self {
        Self { search_path }
    }

    fn executable(&self, android_dir: &Path) -> Result<PathBuf> {
        let wrapper = android_dir.join(WRAPPER);
        if wrapper.is_file() {
            return Ok(wrapper);
        }
        log::debug!("No {} in {}, looking for gradle", WRAPPER, android_dir.display());
        tool_detection::require_tool(
            "gradle",
            "Add the Gradle wrapper to the Android project or install Gradle",
            self.search_path.as_deref(),
        )
    }
}

#[async_trait]
impl ArtifactBuilder for GradleWrapper {
    async fn build_release(&self, android_dir: &Path) -> Result<()> {
        let gradle = self.executable(android_dir)?;
        log::info!("Running {} {}", gradle.display(), RELEASE_ARGS.join(" "));

        let mut cmd = Command::new(&gradle);
        cmd.args(RELEASE_ARGS).current_dir(android_dir);

        let status = process::run_inherited(&mut cmd, "gradle assembleRelease").await?;
        if !status.success() {
            return Err(Error::BuildFailed { status });
        }
        Ok(())
    }
}
