//! Command line interface for the Android release pipeline.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::bundler::{
    Bundler, KeystoreStatus, PasswordSource, ReleaseConfig, Settings, SettingsBuilder, Toolchain,
};
use crate::error::{CliError, Result};
use std::{io, path::PathBuf};

/// Config file picked up from the project dir when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "release.toml";

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let output = OutputManager::new(
        args.verbose || log::log_enabled!(log::Level::Debug),
        args.quiet,
    );

    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let settings = load_settings(&args).await?;
    output.progress(&format!("Android project: {}", settings.android_dir().display()))?;
    output.progress(&format!("Keystore: {}", settings.keystore().display()))?;
    match settings.sdk_root() {
        Some(sdk) => output.verbose(&format!("Android SDK: {}", sdk.display()))?,
        None => output.verbose("Android SDK: not configured, using PATH")?,
    }

    let toolchain = Toolchain::system(&settings);
    let bundler = Bundler::new(settings, toolchain);

    let mut write_error: Option<io::Error> = None;
    let result = bundler
        .run_with(|stage, title| {
            if write_error.is_none() {
                write_error = output.section(&format!("[{stage}] {title}")).err();
            }
        })
        .await;
    let artifact = result?;
    if let Some(e) = write_error {
        return Err(e.into());
    }

    if artifact.keystore == KeystoreStatus::Created {
        let keystore = bundler.settings().keystore().display();
        output.success(&format!("Created keystore {keystore}"))?;
        output.warn(&format!(
            "Back up {keystore}: updates must be signed with the same key"
        ))?;
    }
    output.success(&format!(
        "Published {} ({} bytes)",
        artifact.path.display(),
        artifact.size
    ))?;
    output.indent(&format!("SHA256 {}", artifact.checksum))?;

    Ok(0)
}

/// Resolve settings from the config file, flags and environment.
///
/// Precedence: flags, then the config file, then defaults.
pub async fn load_settings(args: &Args) -> Result<Settings> {
    let config = match &args.config {
        Some(path) => {
            if !tokio::fs::try_exists(path).await.unwrap_or(false) {
                return Err(CliError::MissingConfig {
                    path: path.display().to_string(),
                }
                .into());
            }
            Some(ReleaseConfig::load(path).await?)
        }
        None => {
            let default = args
                .project_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DEFAULT_CONFIG_FILE);
            if tokio::fs::try_exists(&default).await.unwrap_or(false) {
                log::debug!("Using config {}", default.display());
                Some(ReleaseConfig::load(&default).await?)
            } else {
                None
            }
        }
    };

    let mut builder = SettingsBuilder::new();
    if let Some(config) = config {
        builder = builder.config(config);
    }
    if let Some(dir) = &args.project_dir {
        builder = builder.project_dir(dir);
    }
    if let Some(key) = &args.private_key {
        builder = builder.private_key(key);
    }
    if let Some(keystore) = &args.keystore {
        builder = builder.keystore(keystore);
    }
    if let Some(alias) = &args.alias {
        builder = builder.alias(alias.clone());
    }
    if let Some(password) = &args.keystore_password {
        builder = builder.keystore_password(PasswordSource::Value(password.clone()));
    }
    if let Some(password) = &args.key_password {
        builder = builder.key_password(PasswordSource::Value(password.clone()));
    }
    if let Some(out) = &args.output {
        builder = builder.published(out);
    }

    Ok(builder.capture_environment().build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[tokio::test]
    async fn picks_up_project_config() {
        let project = tempfile::tempdir().unwrap();
        std::fs::write(
            project.path().join(DEFAULT_CONFIG_FILE),
            "alias = \"upload\"\nkeystore_password = \"pw\"\npublished = \"dist/app.apk\"\n",
        )
        .unwrap();

        let args = Args {
            project_dir: Some(project.path().to_path_buf()),
            output: Some(PathBuf::from("/abs/out.apk")),
            ..Default::default()
        };
        let settings = load_settings(&args).await.unwrap();

        assert_eq!(settings.identity().alias, "upload");
        assert_eq!(settings.published_artifact(), Path::new("/abs/out.apk"));
        assert_eq!(settings.project_dir(), project.path());
    }

    #[tokio::test]
    async fn explicit_missing_config_is_an_error() {
        let args = Args {
            config: Some(PathBuf::from("/definitely/not/here/release.toml")),
            keystore_password: Some("pw".into()),
            ..Default::default()
        };
        assert!(matches!(
            load_settings(&args).await,
            Err(crate::error::BundlerError::Cli(CliError::MissingConfig { .. }))
        ));
    }
}
