//! apksigner discovery.
//!
//! The SDK's newest `build-tools/<version>` directory is searched first, then the
//! command search path.

use crate::bundler::{
    Error, Result, Settings,
    builder::tool_detection,
    error::ErrorExt,
    utils::fs,
};
use std::{
    fmt, io,
    path::{Path, PathBuf},
};

#[cfg(windows)]
const SDK_SIGNER: &str = "apksigner.bat";
#[cfg(not(windows))]
const SDK_SIGNER: &str = "apksigner";

/// Version of an SDK build-tools directory, ordered numerically.
///
/// Accepts `MAJOR[.MINOR[.PATCH]][-PRERELEASE]`, so `30.0.2 > 29.0.0 > 9.0.0`
/// and `34.0.0-rc1 < 34.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BuildToolsVersion(semver::Version);

impl BuildToolsVersion {
    /// Parses a directory name; `None` when it is not a version.
    pub fn parse(name: &str) -> Option<Self> {
        if let Ok(version) = semver::Version::parse(name) {
            return Some(Self(version));
        }

        let (core, pre) = match name.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (name, None),
        };
        let parts = core
            .split('.')
            .map(|p| p.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;
        if parts.is_empty() || parts.len() > 3 {
            return None;
        }

        let mut version = semver::Version::new(
            parts[0],
            parts.get(1).copied().unwrap_or(0),
            parts.get(2).copied().unwrap_or(0),
        );
        if let Some(pre) = pre {
            version.pre = semver::Prerelease::new(pre).ok()?;
        }
        Some(Self(version))
    }
}

impl fmt::Display for BuildToolsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Highest-versioned subdirectory of `build_tools`.
///
/// A missing `build_tools` directory yields `None`; entries whose names are
/// not versions are ignored.
pub async fn newest_build_tools(
    build_tools: &Path,
) -> Result<Option<(PathBuf, BuildToolsVersion)>> {
    let mut entries = match tokio::fs::read_dir(build_tools).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).fs_context("reading build-tools directory", build_tools),
    };

    let mut newest: Option<(PathBuf, BuildToolsVersion)> = None;
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading build-tools entry", build_tools)?
    {
        let Some(version) = entry.file_name().to_str().and_then(BuildToolsVersion::parse) else {
            continue;
        };
        // Symlinked version directories count.
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            continue;
        }
        if newest.as_ref().is_none_or(|(_, best)| version > *best) {
            newest = Some((entry.path(), version));
        }
    }

    Ok(newest)
}

/// Locates the apksigner executable.
pub async fn locate_signer(settings: &Settings) -> Result<PathBuf> {
    let mut searched = Vec::new();

    if let Some(sdk) = settings.sdk_root() {
        let build_tools = sdk.join("build-tools");
        match newest_build_tools(&build_tools).await? {
            Some((dir, version)) => {
                let candidate = dir.join(SDK_SIGNER);
                if fs::is_file(&candidate).await {
                    log::info!("Using apksigner from build-tools {}", version);
                    return Ok(candidate);
                }
                searched.push(candidate.display().to_string());
            }
            None => searched.push(build_tools.display().to_string()),
        }
    } else {
        log::debug!("No Android SDK root configured");
    }

    if let Some(path) = tool_detection::find_tool("apksigner", settings.search_path()) {
        log::info!("Using apksigner from PATH: {}", path.display());
        return Ok(path);
    }
    searched.push("PATH".to_string());

    Err(Error::SignerNotFound {
        searched: searched.join(", "),
    })
}
