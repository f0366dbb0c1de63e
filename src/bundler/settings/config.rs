//! `release.toml` configuration file.

use crate::bundler::error::{Error, ErrorExt, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// On-disk release configuration. Every field is optional; CLI flags win.
///
/// ```toml
/// private_key = "keys/private_key.pem"
/// keystore = "keys/release.keystore"
/// alias = "release"
/// keystore_password_env = "RELEASE_STORE_PASSWORD"
/// published = "dist/app-release.apk"
/// ```
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
    pub project_dir: Option<PathBuf>,
    pub android_dir: Option<PathBuf>,
    pub private_key: Option<PathBuf>,
    pub keystore: Option<PathBuf>,
    pub keystore_type: Option<String>,
    pub alias: Option<String>,
    pub keystore_password: Option<String>,
    pub keystore_password_env: Option<String>,
    pub key_password: Option<String>,
    pub key_password_env: Option<String>,
    pub distinguished_name: Option<String>,
    pub validity_days: Option<u32>,
    pub published: Option<PathBuf>,
}

impl fmt::Debug for ReleaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseConfig")
            .field("project_dir", &self.project_dir)
            .field("android_dir", &self.android_dir)
            .field("private_key", &self.private_key)
            .field("keystore", &self.keystore)
            .field("keystore_type", &self.keystore_type)
            .field("alias", &self.alias)
            .field("keystore_password", &redacted(&self.keystore_password))
            .field("keystore_password_env", &self.keystore_password_env)
            .field("key_password", &redacted(&self.key_password))
            .field("key_password_env", &self.key_password_env)
            .field("distinguished_name", &self.distinguished_name)
            .field("validity_days", &self.validity_days)
            .field("published", &self.published)
            .finish()
    }
}

/// Placeholder shown instead of a plain password.
pub(crate) fn redacted(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "[REDACTED]")
}

impl ReleaseConfig {
    /// Parse a configuration file.
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .fs_context("reading release config", path)?;
        Self::parse(&raw).map_err(|e| {
            Error::GenericError(format!("invalid release config {}: {e}", path.display()))
        })
    }

    /// Parse configuration from TOML text.
    pub fn parse(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Keystore password source declared in the file, if any.
    pub fn keystore_password_source(&self) -> Option<PasswordSource> {
        PasswordSource::from_parts(
            self.keystore_password.as_deref(),
            self.keystore_password_env.as_deref(),
        )
    }

    /// Key password source declared in the file, if any.
    pub fn key_password_source(&self) -> Option<PasswordSource> {
        PasswordSource::from_parts(self.key_password.as_deref(), self.key_password_env.as_deref())
    }
}

/// Where a password comes from.
///
/// `Debug` never prints a plain value.
#[derive(Clone, PartialEq, Eq)]
pub enum PasswordSource {
    /// Plain value, from the file or a flag.
    Value(String),
    /// Name of an environment variable holding the value.
    Env(String),
}

impl fmt::Debug for PasswordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(_) => f.write_str("Value([REDACTED])"),
            Self::Env(var) => f.debug_tuple("Env").field(var).finish(),
        }
    }
}

impl PasswordSource {
    fn from_parts(value: Option<&str>, env: Option<&str>) -> Option<Self> {
        match (value, env) {
            (Some(value), _) => Some(Self::Value(value.to_string())),
            (None, Some(var)) => Some(Self::Env(var.to_string())),
            (None, None) => None,
        }
    }

    /// Resolve to a secret.
    pub fn resolve(&self) -> Result<SecretString> {
        match self {
            Self::Value(value) => Ok(SecretString::from(value.clone())),
            Self::Env(var) => std::env::var(var).map(SecretString::from).map_err(|_| {
                Error::GenericError(format!("password environment variable {var} is not set"))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn parses_partial_config() {
        let cfg = ReleaseConfig::parse(
            r#"
            private_key = "keys/key.pem"
            alias = "upload"
            keystore_password = "hunter2"
            key_password_env = "UPLOAD_KEY_PASSWORD"
            validity_days = 7300
            "#,
        )
        .unwrap();

        assert_eq!(cfg.private_key, Some(PathBuf::from("keys/key.pem")));
        assert_eq!(cfg.alias.as_deref(), Some("upload"));
        assert_eq!(cfg.validity_days, Some(7300));
        assert_eq!(
            cfg.keystore_password_source(),
            Some(PasswordSource::Value("hunter2".into()))
        );
        assert_eq!(
            cfg.key_password_source(),
            Some(PasswordSource::Env("UPLOAD_KEY_PASSWORD".into()))
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(ReleaseConfig::parse("signing_key = \"x\"").is_err());
    }

    #[test]
    fn plain_value_wins_over_env() {
        let source = PasswordSource::from_parts(Some("plain"), Some("IGNORED_VAR")).unwrap();
        assert_eq!(source.resolve().unwrap().expose_secret(), "plain");
    }

    #[test]
    fn debug_output_hides_plain_passwords() {
        let cfg = ReleaseConfig::parse("keystore_password = \"hunter2\"").unwrap();
        let source = cfg.keystore_password_source().unwrap();
        assert_eq!(format!("{source:?}"), "Value([REDACTED])");
        assert!(!format!("{cfg:?}").contains("hunter2"));
        assert_eq!(
            format!("{:?}", PasswordSource::Env("STORE_PASS".into())),
            "Env(\"STORE_PASS\")"
        );
    }

    #[test]
    fn missing_env_password_is_an_error() {
        let source = PasswordSource::Env("KODEGEN_TEST_UNSET_PASSWORD_VAR".into());
        assert!(source.resolve().is_err());
    }
}
