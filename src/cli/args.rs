//! Command line argument parsing and validation.

use crate::bundler::settings::redacted;
use clap::Parser;
use std::{fmt, path::PathBuf};

/// Android release signing pipeline
#[derive(Parser, Default)]
#[command(
    name = "kodegen_bundler_android",
    version,
    about = "Builds, signs, verifies and publishes an Android release APK",
    long_about = "Builds, signs, verifies and publishes an Android release APK.

Converts a PEM private key into a keystore on first run (reused afterwards),
runs `gradlew assembleRelease -x clean --no-daemon`, signs the unsigned APK
with the newest SDK apksigner, verifies the signature and moves the result
to the output path.

Usage:
  kodegen_bundler_android --keystore-password \"$STORE_PASS\"
  kodegen_bundler_android --config release.toml --output dist/app-release.apk

Exit code 0 = verified artifact guaranteed to exist at output path."
)]
pub struct Args {
    /// Release config file (TOML). Defaults to release.toml in the project dir if present
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Application project root
    #[arg(short = 'C', long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// PEM private key
    #[arg(short = 'k', long, value_name = "PATH")]
    pub private_key: Option<PathBuf>,

    /// Keystore to create or reuse
    #[arg(long, value_name = "PATH")]
    pub keystore: Option<PathBuf>,

    /// Key alias inside the keystore
    #[arg(short, long, value_name = "ALIAS")]
    pub alias: Option<String>,

    /// Keystore password
    #[arg(long, env = "KEYSTORE_PASSWORD", hide_env_values = true)]
    pub keystore_password: Option<String>,

    /// Key password (defaults to the keystore password)
    #[arg(long, env = "KEY_PASSWORD", hide_env_values = true)]
    pub key_password: Option<String>,

    /// Output path for the signed APK
    ///
    /// Contract: Exit code 0 guarantees a verified artifact exists at this path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print extra detail (SDK root, tool locations)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress progress output; errors are still printed
    #[arg(short, long)]
    pub quiet: bool,
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("config", &self.config)
            .field("project_dir", &self.project_dir)
            .field("private_key", &self.private_key)
            .field("keystore", &self.keystore)
            .field("alias", &self.alias)
            .field("keystore_password", &redacted(&self.keystore_password))
            .field("key_password", &redacted(&self.key_password))
            .field("output", &self.output)
            .field("verbose", &self.verbose)
            .field("quiet", &self.quiet)
            .finish()
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.alias.as_deref().is_some_and(|a| a.trim().is_empty()) {
            return Err("Alias cannot be empty".to_string());
        }
        if self.keystore_password.as_deref() == Some("") {
            return Err("Keystore password cannot be empty".to_string());
        }
        Ok(())
    }
}
