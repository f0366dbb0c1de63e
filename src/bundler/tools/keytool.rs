//! keytool-backed keystore converter.

use super::{ImportRequest, KeystoreConverter, process};
use crate::bundler::{
    builder::tool_detection,
    error::{Error, Result},
};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use std::ffi::OsString;
use tokio::process::Command;

const SRC_STORE_PASS_VAR: &str = "KODEGEN_SRC_STORE_PASSWORD";
const DEST_STORE_PASS_VAR: &str = "KODEGEN_DEST_STORE_PASSWORD";
const DEST_KEY_PASS_VAR: &str = "KODEGEN_DEST_KEY_PASSWORD";

/// `keytool -importkeystore` wrapper.
#[derive(Debug, Clone, Default)]
pub struct Keytool {
    search_path: Option<OsString>,
}

impl Keytool {
    /// Creates a wrapper resolving `keytool` against `search_path`.
    pub fn new(search_path: Option<OsString>) -> Self {
        Self { search_path }
    }
}

#[async_trait]
impl KeystoreConverter for Keytool {
    fn ensure_available(&self) -> Result<()> {
        tool_detection::require_tool(
            "keytool",
            "Install a JDK and make sure keytool is on PATH",
            self.search_path.as_deref(),
        )
        .map(|_| ())
    }

    async fn import_pkcs12(&self, request: &ImportRequest<'_>) -> Result<()> {
        let mut cmd = Command::new(tool_detection::program(
            "keytool",
            self.search_path.as_deref(),
        ));
        cmd.args(["-importkeystore", "-noprompt", "-srckeystore"])
            .arg(request.source)
            .args(["-srcstoretype", "PKCS12", "-srcstorepass:env", SRC_STORE_PASS_VAR])
            .arg("-destkeystore")
            .arg(request.destination)
            .args(["-deststoretype", request.destination_type])
            .args(["-deststorepass:env", DEST_STORE_PASS_VAR])
            .args(["-destkeypass:env", DEST_KEY_PASS_VAR])
            .args(["-srcalias", request.alias, "-destalias", request.alias])
            .env(SRC_STORE_PASS_VAR, request.source_password.expose_secret())
            .env(DEST_STORE_PASS_VAR, request.destination_password.expose_secret())
            .env(DEST_KEY_PASS_VAR, request.key_password.expose_secret());

        let out = process::run_captured(&mut cmd, "keytool -importkeystore").await?;
        if !out.status.success() {
            return Err(Error::KeystoreCreation {
                step: "keystore import".to_string(),
                detail: process::failure_detail(&out),
            });
        }
        Ok(())
    }
}
