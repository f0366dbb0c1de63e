//! Builder for constructing Settings.

use super::{
    DEFAULT_DISTINGUISHED_NAME, DEFAULT_VALIDITY_DAYS, PasswordSource, ReleaseConfig,
    SDK_ROOT_VARS, Settings, SigningIdentity,
};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Builder for constructing [`Settings`].
///
/// Values set later override earlier ones, so the usual order is
/// [`SettingsBuilder::config`] first, then CLI flags, then
/// [`SettingsBuilder::capture_environment`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_android::bundler::{PasswordSource, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_android::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir("mobile")
///     .private_key("keys/private_key.pem")
///     .keystore_password(PasswordSource::Env("STORE_PASSWORD".into()))
///     .capture_environment()
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    project_dir: Option<PathBuf>,
    android_dir: Option<PathBuf>,
    private_key: Option<PathBuf>,
    keystore: Option<PathBuf>,
    keystore_type: Option<String>,
    alias: Option<String>,
    keystore_password: Option<PasswordSource>,
    key_password: Option<PasswordSource>,
    distinguished_name: Option<String>,
    validity_days: Option<u32>,
    published: Option<PathBuf>,
    sdk_root: Option<PathBuf>,
    search_path: Option<OsString>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Seeds the builder from a parsed config file.
    pub fn config(mut self, config: ReleaseConfig) -> Self {
        let keystore_password = config.keystore_password_source();
        let key_password = config.key_password_source();
        self.project_dir = config.project_dir.or(self.project_dir);
        self.android_dir = config.android_dir.or(self.android_dir);
        self.private_key = config.private_key.or(self.private_key);
        self.keystore = config.keystore.or(self.keystore);
        self.keystore_type = config.keystore_type.or(self.keystore_type);
        self.alias = config.alias.or(self.alias);
        self.keystore_password = keystore_password.or(self.keystore_password);
        self.key_password = key_password.or(self.key_password);
        self.distinguished_name = config.distinguished_name.or(self.distinguished_name);
        self.validity_days = config.validity_days.or(self.validity_days);
        self.published = config.published.or(self.published);
        self
    }

    /// Application project root. Relative paths resolve against it.
    ///
    /// Default: current directory
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Android project directory.
    ///
    /// Default: `<project>/android`
    pub fn android_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.android_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// PEM private key.
    ///
    /// Default: `private_key.pem`
    pub fn private_key<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.private_key = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keystore file.
    ///
    /// Default: `release.keystore`
    pub fn keystore<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.keystore = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keystore type passed to keytool.
    ///
    /// Default: `JKS`
    pub fn keystore_type(mut self, store_type: impl Into<String>) -> Self {
        self.keystore_type = Some(store_type.into());
        self
    }

    /// Key alias.
    ///
    /// Default: `release`
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Keystore password.
    ///
    /// # Required
    pub fn keystore_password(mut self, source: PasswordSource) -> Self {
        self.keystore_password = Some(source);
        self
    }

    /// Key password.
    ///
    /// Default: the keystore password
    pub fn key_password(mut self, source: PasswordSource) -> Self {
        self.key_password = Some(source);
        self
    }

    /// Certificate subject without the CN component.
    pub fn distinguished_name(mut self, dn: impl Into<String>) -> Self {
        self.distinguished_name = Some(dn.into());
        self
    }

    /// Certificate validity in days.
    ///
    /// Default: 3650
    pub fn validity_days(mut self, days: u32) -> Self {
        self.validity_days = Some(days);
        self
    }

    /// Final published APK path.
    ///
    /// Default: `app-release.apk`
    pub fn published<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.published = Some(path.as_ref().to_path_buf());
        self
    }

    /// Android SDK root.
    pub fn sdk_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sdk_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Command search path (same format as `PATH`).
    pub fn search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    /// Captures the SDK root and `PATH` from the process environment unless
    /// already set explicitly.
    pub fn capture_environment(mut self) -> Self {
        if self.sdk_root.is_none() {
            self.sdk_root = SDK_ROOT_VARS
                .iter()
                .filter_map(std::env::var_os)
                .find(|v| !v.is_empty())
                .map(PathBuf::from);
        }
        if self.search_path.is_none() {
            self.search_path = std::env::var_os("PATH");
        }
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if no keystore password was provided or a password
    /// environment variable is unset.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        let project_dir = self.project_dir.unwrap_or_else(|| PathBuf::from("."));
        let resolve = |path: PathBuf| {
            if path.is_absolute() {
                path
            } else {
                project_dir.join(path)
            }
        };

        let keystore_source = self
            .keystore_password
            .context("keystore password is required (--keystore-password or KEYSTORE_PASSWORD)")?;
        let keystore_password = keystore_source.resolve()?;
        let key_password = self.key_password.unwrap_or(keystore_source).resolve()?;

        let android_dir = resolve(self.android_dir.unwrap_or_else(|| PathBuf::from("android")));
        let private_key = resolve(self.private_key.unwrap_or_else(|| "private_key.pem".into()));
        let keystore = resolve(self.keystore.unwrap_or_else(|| "release.keystore".into()));
        let published = resolve(self.published.unwrap_or_else(|| "app-release.apk".into()));

        Ok(Settings {
            android_dir,
            private_key,
            keystore,
            keystore_type: self.keystore_type.unwrap_or_else(|| "JKS".to_string()),
            identity: SigningIdentity {
                alias: self.alias.unwrap_or_else(|| "release".to_string()),
                keystore_password,
                key_password,
            },
            distinguished_name: self
                .distinguished_name
                .unwrap_or_else(|| DEFAULT_DISTINGUISHED_NAME.to_string()),
            validity_days: self.validity_days.unwrap_or(DEFAULT_VALIDITY_DAYS),
            published,
            sdk_root: self.sdk_root,
            search_path: self.search_path,
            project_dir,
        })
    }
}
