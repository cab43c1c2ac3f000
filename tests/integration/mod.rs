//! Integration test utilities and helpers
//!
//! This module provides common test infrastructure for SOAP caller
//! integration tests, including a mock gateway and caller construction.

#![allow(dead_code)]

use std::sync::Arc;

use cordys_admin_client::artifact::StaticArtifactProvider;
use cordys_admin_client::{ARTIFACT_PARAM, CallerConfig, SoapCaller};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path of the SOAP gateway endpoint
pub const GATEWAY_PATH: &str = "/cordys/com.eibus.web.soap.Gateway.wcp";

/// Content type every SOAP request must carry
pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=UTF-8";

/// Minimal SOAP request envelope
pub const GET_ORGANIZATIONS: &str = r#"<SOAP:Envelope xmlns:SOAP="http://schemas.xmlsoap.org/soap/envelope/"><SOAP:Body><GetOrganizations xmlns="http://schemas.cordys.com/1.0/ldap"/></SOAP:Body></SOAP:Envelope>"#;

/// Minimal SOAP response envelope
pub const ORGANIZATIONS_RESPONSE: &str = r#"<SOAP:Envelope xmlns:SOAP="http://schemas.xmlsoap.org/soap/envelope/"><SOAP:Body><GetOrganizationsResponse xmlns="http://schemas.cordys.com/1.0/ldap"><tuple><old><entry dn="o=system,cn=cordys,cn=dev,o=example.com"/></old></tuple></GetOrganizationsResponse></SOAP:Body></SOAP:Envelope>"#;

/// SOAP fault body returned with HTTP 500
pub const SOAP_FAULT: &str = r#"<SOAP:Envelope xmlns:SOAP="http://schemas.xmlsoap.org/soap/envelope/"><SOAP:Body><SOAP:Fault><faultcode>Server.AccessDenied</faultcode><faultstring>Access denied</faultstring></SOAP:Fault></SOAP:Body></SOAP:Envelope>"#;

/// Mock SOAP gateway for integration tests
pub struct MockGateway {
    server: MockServer,
}

impl MockGateway {
    /// Start a new mock gateway
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Base URL of the mock server
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Full URL of the gateway endpoint
    pub fn gateway_url(&self) -> String {
        format!("{}{}", self.server.uri(), GATEWAY_PATH)
    }

    /// Reference to the inner MockServer for custom mocking
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Accept SOAP requests carrying `artifact` and answer `200 OK`
    pub async fn mock_soap_ok(&self, artifact: &str, response_body: &str) {
        Mock::given(method("POST"))
            .and(path(GATEWAY_PATH))
            .and(query_param(ARTIFACT_PARAM, artifact))
            .and(header("Content-Type", SOAP_CONTENT_TYPE))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(response_body)
                    .insert_header("Content-Type", SOAP_CONTENT_TYPE),
            )
            .expect(1..)
            .mount(&self.server)
            .await;
    }

    /// Answer every SOAP request with the given status and body
    pub async fn mock_status(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(GATEWAY_PATH))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_string(body)
                    .insert_header("Content-Type", SOAP_CONTENT_TYPE),
            )
            .mount(&self.server)
            .await;
    }

    /// Fail the test if any request reaches the gateway
    pub async fn expect_no_requests(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Raw query strings of every request received so far
    pub async fn received_queries(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| r.url.query().unwrap_or_default().to_string())
            .collect()
    }
}

/// Build a caller for `system` holding `artifact`, with plain defaults
pub fn caller_with_artifact(
    system: &str,
    artifact: &str,
) -> SoapCaller<Arc<StaticArtifactProvider>> {
    let provider = Arc::new(StaticArtifactProvider::new());
    provider.insert(system, artifact);
    caller_with_provider(system, provider)
}

/// Build a caller for `system` around an existing provider
pub fn caller_with_provider(
    system: &str,
    provider: Arc<StaticArtifactProvider>,
) -> SoapCaller<Arc<StaticArtifactProvider>> {
    let config = CallerConfig::builder()
        .system(system)
        .build()
        .expect("Valid config");
    let transport = cordys_admin_client::ReqwestTransport::new(&config).expect("Valid transport");
    SoapCaller::new(system, provider, transport)
}
