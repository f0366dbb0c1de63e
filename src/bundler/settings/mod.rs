//! Configuration structures for the release pipeline.
//!
//! All configuration (file, CLI flags, environment) is resolved once into an
//! immutable [`Settings`] that every stage borrows.

mod builder;
mod config;
mod core;

pub use self::builder::SettingsBuilder;
pub use self::config::{PasswordSource, ReleaseConfig};
pub(crate) use self::config::redacted;
pub use self::core::{Settings, SigningIdentity};

/// Environment variables checked for the Android SDK root, in order.
pub const SDK_ROOT_VARS: [&str; 2] = ["ANDROID_HOME", "ANDROID_SDK_ROOT"];

/// Default certificate subject used for the first self-signing attempt.
pub const DEFAULT_DISTINGUISHED_NAME: &str =
    "/C=US/ST=California/L=San Francisco/O=Release/OU=Mobile";

/// Default certificate validity, roughly ten years.
pub const DEFAULT_VALIDITY_DAYS: u32 = 3650;
