//! PEM private key to keystore conversion.
//!
//! The keystore is created once. An existing keystore is never touched, so
//! the signing identity cannot rotate behind the user's back.

use crate::bundler::{
    Result, Settings,
    error::ErrorExt,
    tools::{CertificateAuthority, ImportRequest, KeystoreConverter, Pkcs12Request},
    utils::fs,
};
use std::path::Path;

/// Outcome of [`provision_keystore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeystoreStatus {
    /// A keystore already existed and was left as is.
    Reused,
    /// A new keystore was created from the private key.
    Created,
}

/// Ensures a keystore exists at the configured path.
///
/// # Process
///
/// 1. Existing keystore: return [`KeystoreStatus::Reused`]
/// 2. Check the certificate and keystore utilities are installed
/// 3. Self-sign a certificate, retrying with a `/CN=` only subject if the
///    full distinguished name is rejected
/// 4. Bundle key and certificate into PKCS12 under the alias
/// 5. Import the PKCS12 bundle into the keystore
/// 6. Remove the certificate and PKCS12 bundle whatever the outcome
///
/// A keystore partially written by a failed import is removed as well.
pub async fn provision_keystore(
    settings: &Settings,
    authority: &dyn CertificateAuthority,
    converter: &dyn KeystoreConverter,
) -> Result<KeystoreStatus> {
    let keystore = settings.keystore();
    if tokio::fs::try_exists(keystore)
        .await
        .fs_context("checking for existing keystore", keystore)?
    {
        log::info!("Keystore already exists at {}, reusing it", keystore.display());
        return Ok(KeystoreStatus::Reused);
    }

    authority.ensure_available()?;
    converter.ensure_available()?;

    if let Some(parent) = keystore.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating keystore directory", parent)?;
    }

    let certificate = settings.certificate_path();
    let pkcs12 = settings.pkcs12_path();

    let result = convert(settings, authority, converter, &certificate, &pkcs12).await;

    for ephemeral in [&certificate, &pkcs12] {
        if let Err(e) = fs::remove_file(ephemeral).await {
            log::warn!("Could not remove {}: {}", ephemeral.display(), e);
        }
    }

    if let Err(e) = result {
        if let Ok(true) = fs::remove_file(keystore).await {
            log::warn!("Removed partially written keystore {}", keystore.display());
        }
        return Err(e);
    }

    log::info!("✓ Created keystore {}", keystore.display());
    Ok(KeystoreStatus::Created)
}

async fn convert(
    settings: &Settings,
    authority: &dyn CertificateAuthority,
    converter: &dyn KeystoreConverter,
    certificate: &Path,
    pkcs12: &Path,
) -> Result<()> {
    let key = settings.private_key();
    let identity = settings.identity();
    let days = settings.validity_days();

    let full = settings.full_subject();
    if let Err(e) = authority.self_sign(key, certificate, &full, days).await {
        let minimal = settings.minimal_subject();
        log::warn!(
            "Certificate generation with subject {} failed ({}), retrying with {}",
            full,
            e,
            minimal
        );
        authority.self_sign(key, certificate, &minimal, days).await?;
    }

    authority
        .export_pkcs12(&Pkcs12Request {
            certificate,
            private_key: key,
            output: pkcs12,
            alias: &identity.alias,
            password: &identity.keystore_password,
        })
        .await?;

    converter
        .import_pkcs12(&ImportRequest {
            source: pkcs12,
            source_password: &identity.keystore_password,
            destination: settings.keystore(),
            destination_type: settings.keystore_type(),
            destination_password: &identity.keystore_password,
            key_password: &identity.key_password,
            alias: &identity.alias,
        })
        .await
}
