//! External tool detection and availability checking.

use crate::bundler::error::{Error, Result};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

/// Resolve `name` against `search_path`.
///
/// Without a search path nothing is found; the process `PATH` is only
/// consulted when settings capture it.
pub fn find_tool(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let Some(paths) = search_path else {
        log::debug!("{} not looked up: no search path configured", name);
        return None;
    };

    match which::which_in(name, Some(paths), Path::new(".")) {
        Ok(path) => {
            log::debug!("Found {} at: {}", name, path.display());
            Some(path)
        }
        Err(e) => {
            log::debug!("{} not found in search path: {}", name, e);
            None
        }
    }
}

/// Like [`find_tool`], but a missing tool is a `ToolNotFound` error.
pub fn require_tool(name: &str, hint: &str, search_path: Option<&OsStr>) -> Result<PathBuf> {
    find_tool(name, search_path).ok_or_else(|| Error::ToolNotFound {
        tool: name.to_string(),
        hint: hint.to_string(),
    })
}

/// Program to spawn for `name`: the resolved path if found, the bare name otherwise.
pub fn program(name: &str, search_path: Option<&OsStr>) -> PathBuf {
    find_tool(name, search_path).unwrap_or_else(|| Path::new(name).to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_reports_name_and_hint() {
        let empty = tempfile::tempdir().unwrap();
        let err = require_tool(
            "kodegen-definitely-missing-tool",
            "install it",
            Some(empty.path().as_os_str()),
        )
        .unwrap_err();

        match err {
            Error::ToolNotFound { tool, hint } => {
                assert_eq!(tool, "kodegen-definitely-missing-tool");
                assert_eq!(hint, "install it");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_search_path_finds_nothing() {
        assert!(find_tool("sh", None).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn finds_executable_in_search_path() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("openssl");
        std::fs::write(&tool, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let found = find_tool("openssl", Some(dir.path().as_os_str())).unwrap();
        assert_eq!(found, tool);
    }
}
