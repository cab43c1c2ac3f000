// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)

//! Integration tests for settings-driven callers

use std::io::Write;
use std::sync::Arc;

use crate::integration::{GATEWAY_PATH, MockGateway, ORGANIZATIONS_RESPONSE};
use cordys_admin_client::settings::SettingsLoader;
use cordys_admin_client::template::Bindings;
use cordys_admin_client::{ArtifactProvider, SoapCaller};
use wiremock::matchers::{basic_auth, body_string, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const BODY_TEMPLATE: &str = r#"<SOAP:Envelope xmlns:SOAP="http://schemas.xmlsoap.org/soap/envelope/"><SOAP:Body><GetOrganizations xmlns="http://schemas.cordys.com/1.0/ldap"><dn>${org}</dn><path>${CORDYS_INSTALL_DIR}/lib</path><price>${dollar}0</price></GetOrganizations></SOAP:Body></SOAP:Envelope>"#;

const RENDERED_BODY: &str = r#"<SOAP:Envelope xmlns:SOAP="http://schemas.xmlsoap.org/soap/envelope/"><SOAP:Body><GetOrganizations xmlns="http://schemas.cordys.com/1.0/ldap"><dn>o=system,cn=cordys</dn><path>/opt/cordys/lib</path><price>$0</price></GetOrganizations></SOAP:Body></SOAP:Envelope>"#;

#[tokio::test]
async fn test_settings_to_call_end_to_end() {
    let mock = MockGateway::start().await;

    Mock::given(method("POST"))
        .and(path(GATEWAY_PATH))
        .and(query_param("SAMLart", "file-artifact"))
        .and(query_param("organization", "o=system,cn=cordys"))
        .and(basic_auth("svc-admin", "s3cret"))
        .and(body_string(RENDERED_BODY))
        .respond_with(ResponseTemplate::new(200).set_body_string(ORGANIZATIONS_RESPONSE))
        .expect(1)
        .mount(mock.inner())
        .await;

    let dir = tempfile::tempdir().unwrap();
    let artifact_path = dir.path().join("dev.artifact");
    std::fs::write(&artifact_path, "file-artifact\n").unwrap();
    let password_path = dir.path().join("password");
    std::fs::write(&password_path, "s3cret").unwrap();

    let mut settings_file = tempfile::NamedTempFile::new().unwrap();
    write!(
        settings_file,
        r#"
[defaults]
timeout_seconds = 5

[systems.dev]
gateway_url = "{gateway}?organization=${{org}}"
artifact = "file:{artifact}"
install_dir = "/opt/cordys"

[systems.dev.variables]
org = "o=system,cn=cordys"

[systems.dev.authentication]
username = "svc-admin"
password_source = "file:{password}"
"#,
        gateway = mock.gateway_url(),
        artifact = artifact_path.display(),
        password = password_path.display(),
    )
    .unwrap();

    let settings = SettingsLoader::new()
        .with_path(settings_file.path())
        .load()
        .expect("Settings should load");

    let system = settings.system("dev").unwrap();
    let url = settings.gateway_url("dev", &Bindings::new()).unwrap();
    let body = system.render(BODY_TEMPLATE, &Bindings::new()).unwrap();
    assert_eq!(body, RENDERED_BODY);

    let provider: Arc<dyn ArtifactProvider> = Arc::new(settings.artifact_provider().unwrap());
    let caller = SoapCaller::from_config(&settings.to_caller_config("dev").unwrap(), provider)
        .expect("Caller creation failed");

    let response = caller.call(&url, &body).await.expect("Call should succeed");
    assert_eq!(response, ORGANIZATIONS_RESPONSE);

    let query = &mock.received_queries().await[0];
    assert!(query.starts_with("SAMLart=file-artifact&"), "query: {query}");
}

#[tokio::test]
async fn test_unknown_system_rejected() {
    let settings = SettingsLoader::new()
        .load_from_str(
            r#"
[systems.dev]
gateway_url = "https://dev.example.com/gateway"
artifact = "literal:abc"
"#,
        )
        .unwrap();

    assert!(settings.to_caller_config("prod").is_err());
    assert!(settings.gateway_url("prod", &Bindings::new()).is_err());
}
