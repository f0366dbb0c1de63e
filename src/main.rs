//! Kodegen Bundler Android - release signing pipeline for Android apps.
//!
//! Provisions a keystore from a PEM key, builds the release APK, signs and
//! verifies it with apksigner, and publishes it to a fixed path.

use kodegen_bundler_android::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
