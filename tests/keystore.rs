mod common;

use common::Project;
use kodegen_bundler_android::bundler::{Error, KeystoreStatus, stages::provision_keystore};

#[tokio::test]
async fn creates_keystore_and_removes_intermediates() {
    let project = Project::new();
    let settings = project.settings();

    let status = provision_keystore(&settings, &project.authority(), &project.converter())
        .await
        .unwrap();

    assert_eq!(status, KeystoreStatus::Created);
    let content = std::fs::read_to_string(project.keystore()).unwrap();
    assert_eq!(content, "KEYSTORE JKS release key-pass #0");
    assert!(!settings.certificate_path().exists());
    assert!(!settings.pkcs12_path().exists());
}

#[tokio::test]
async fn existing_keystore_is_never_regenerated() {
    let project = Project::new();
    std::fs::write(project.keystore(), b"hand-made keystore").unwrap();

    let mut authority = project.authority();
    authority.missing = true;
    let status = provision_keystore(&project.settings(), &authority, &project.converter())
        .await
        .unwrap();

    assert_eq!(status, KeystoreStatus::Reused);
    assert_eq!(std::fs::read(project.keystore()).unwrap(), b"hand-made keystore");
    assert!(project.calls.all().is_empty());
}

#[tokio::test]
async fn rejected_subject_retries_with_common_name_only() {
    let project = Project::new();
    let mut authority = project.authority();
    authority.reject_full_subject = true;

    let status = provision_keystore(&project.settings(), &authority, &project.converter())
        .await
        .unwrap();

    assert_eq!(status, KeystoreStatus::Created);
    let self_signs: Vec<_> = project
        .calls
        .all()
        .into_iter()
        .filter(|c| c.starts_with("self_sign"))
        .collect();
    assert_eq!(self_signs.len(), 2);
    assert!(self_signs[0].contains("/O=Release"));
    assert_eq!(self_signs[1], "self_sign /CN=release 3650");
}

#[tokio::test]
async fn failed_import_cleans_up_everything() {
    let project = Project::new();
    let settings = project.settings();
    let mut converter = project.converter();
    converter.fail = true;

    let err = provision_keystore(&settings, &project.authority(), &converter)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::KeystoreCreation { ref step, .. } if step == "keystore import"));
    assert!(!settings.certificate_path().exists());
    assert!(!settings.pkcs12_path().exists());
    assert!(!project.keystore().exists(), "partial keystore must not survive");
}

#[tokio::test]
async fn missing_tools_fail_before_any_file_is_written() {
    let project = Project::new();
    let mut authority = project.authority();
    authority.missing = true;

    let err = provision_keystore(&project.settings(), &authority, &project.converter())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ToolNotFound { ref tool, .. } if tool == "openssl"));
    assert!(project.calls.all().is_empty());
    assert!(!project.keystore().exists());
}

#[tokio::test]
async fn keystore_directory_is_created() {
    let project = Project::new();
    let settings = project
        .settings_builder()
        .keystore("keys/upload.jks")
        .keystore_type("PKCS12")
        .build()
        .unwrap();

    provision_keystore(&settings, &project.authority(), &project.converter())
        .await
        .unwrap();

    let content = std::fs::read_to_string(project.path("keys/upload.jks")).unwrap();
    assert!(content.starts_with("KEYSTORE PKCS12 release"));
}
