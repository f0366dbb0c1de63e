//! OpenSSL-backed certificate authority.

use super::{CertificateAuthority, Pkcs12Request, process};
use crate::bundler::{
    builder::tool_detection,
    error::{Error, Result},
};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use std::{ffi::OsString, path::Path};
use tokio::process::Command;

/// Child environment variable carrying the PKCS12 export password.
const PKCS12_PASSWORD_VAR: &str = "KODEGEN_PKCS12_PASSWORD";

/// `openssl req` / `openssl pkcs12` wrapper.
#[derive(Debug, Clone, Default)]
pub struct OpenSsl {
    search_path: Option<OsString>,
}

impl OpenSsl {
    /// Creates a wrapper resolving `openssl` against `search_path`.
    pub fn new(search_path: Option<OsString>) -> Self {
        Self { search_path }
    }

    fn command(&self) -> Command {
        Command::new(tool_detection::program("openssl", self.search_path.as_deref()))
    }
}

#[async_trait]
impl CertificateAuthority for OpenSsl {
    fn ensure_available(&self) -> Result<()> {
        tool_detection::require_tool(
            "openssl",
            "Install OpenSSL (e.g., apt-get install openssl) to convert the private key",
            self.search_path.as_deref(),
        )
        .map(|_| ())
    }

    async fn self_sign(
        &self,
        private_key: &Path,
        output: &Path,
        subject: &str,
        validity_days: u32,
    ) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["req", "-new", "-x509", "-key"])
            .arg(private_key)
            .arg("-out")
            .arg(output)
            .arg("-days")
            .arg(validity_days.to_string())
            .args(["-subj", subject]);

        let out = process::run_captured(&mut cmd, "openssl req").await?;
        if !out.status.success() {
            return Err(Error::KeystoreCreation {
                step: "certificate generation".to_string(),
                detail: process::failure_detail(&out),
            });
        }
        Ok(())
    }

    async fn export_pkcs12(&self, request: &Pkcs12Request<'_>) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["pkcs12", "-export", "-in"])
            .arg(request.certificate)
            .arg("-inkey")
            .arg(request.private_key)
            .arg("-out")
            .arg(request.output)
            .args(["-name", request.alias])
            .arg("-passout")
            .arg(format!("env:{PKCS12_PASSWORD_VAR}"))
            .args(["-noiter", "-nomaciter"])
            .env(PKCS12_PASSWORD_VAR, request.password.expose_secret());

        let out = process::run_captured(&mut cmd, "openssl pkcs12").await?;
        if !out.status.success() {
            return Err(Error::KeystoreCreation {
                step: "PKCS12 export".to_string(),
                detail: process::failure_detail(&out),
            });
        }
        Ok(())
    }
}
