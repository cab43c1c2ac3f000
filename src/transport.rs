//! HTTP transport for SOAP exchanges.
//!
//! The [`HttpTransport`] trait is the seam between the SOAP caller and the
//! network: one POST in, one status and body out. [`ReqwestTransport`] is
//! the production implementation; tests substitute their own.

use async_trait::async_trait;
use base64::prelude::*;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use crate::config::{CallerConfig, HttpAuth, TrustAnchors};
use crate::error::{AdminError, Result};

/// Content type of every SOAP request body.
pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=UTF-8";

/// A fully prepared SOAP POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapRequest {
    /// Gateway URL.
    pub url: Url,
    /// Query parameters in wire order.
    pub query: Vec<(String, String)>,
    /// SOAP envelope as UTF-8 XML.
    pub body: String,
}

/// What came back from the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapResponse {
    /// Numeric HTTP status.
    pub status: u16,
    /// Status line, e.g. `HTTP/1.1 200 OK`.
    pub status_line: String,
    /// Response body text.
    pub body: String,
}

impl SoapResponse {
    /// Returns true for exactly `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Executes SOAP POST requests.
///
/// Implementations must be safe to share between concurrent calls.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one request and return the gateway's answer, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::TransportFailure`] if the exchange could not
    /// complete (connection refused, timeout, broken stream).
    async fn post(&self, request: SoapRequest) -> Result<SoapResponse>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    async fn post(&self, request: SoapRequest) -> Result<SoapResponse> {
        (**self).post(request).await
    }
}

/// [`HttpTransport`] backed by a pooled `reqwest::Client`.
///
/// HTTP Basic credentials from the configuration are sent preemptively on
/// every request, next to the SAML artifact in the query string.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    http_auth: Option<HttpAuth>,
}

impl ReqwestTransport {
    /// Build a transport from the caller configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if TLS configuration fails.
    pub fn new(config: &CallerConfig) -> Result<Self> {
        let http = build_http_client(config)?;

        Ok(Self {
            http,
            http_auth: config.http_auth.clone(),
        })
    }

    /// Add HTTP Basic auth header if configured.
    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref auth) = self.http_auth {
            let credentials = BASE64_STANDARD.encode(format!("{}:{}", auth.username, auth.password));
            let header_value = format!("Basic {}", credentials);
            request.header(AUTHORIZATION, header_value)
        } else {
            request
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: SoapRequest) -> Result<SoapResponse> {
        let mut builder = self
            .http
            .post(request.url)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .body(request.body);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = self.add_auth_header(builder);

        let response = builder.send().await?;

        let status = response.status();
        let status_line = format!("{:?} {}", response.version(), status);
        let body = response.text().await?;

        Ok(SoapResponse {
            status: status.as_u16(),
            status_line,
            body,
        })
    }
}

/// Build a reqwest Client with the appropriate TLS configuration.
pub fn build_http_client(config: &CallerConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(config.user_agent.as_str())
        .use_rustls_tls();

    match &config.trust_anchors {
        TrustAnchors::WebPki => {
            builder = builder.tls_built_in_root_certs(true);
        }
        TrustAnchors::Explicit(ca_certs) => {
            builder = builder.tls_built_in_root_certs(false);
            for ca_pem in ca_certs {
                let cert = reqwest::Certificate::from_pem(ca_pem).map_err(|e| {
                    AdminError::tls(format!("Failed to parse CA certificate: {}", e))
                })?;
                builder = builder.add_root_certificate(cert);
            }
        }
        TrustAnchors::InsecureAcceptAny => {
            builder = builder
                .tls_built_in_root_certs(false)
                .danger_accept_invalid_certs(true);
        }
    }

    builder = builder.min_tls_version(reqwest::tls::Version::TLS_1_2);

    let mut headers = reqwest::header::HeaderMap::new();
    for (name, value) in &config.additional_headers {
        match (
            reqwest::header::HeaderName::try_from(name.as_str()),
            reqwest::header::HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "Skipping invalid additional header"),
        }
    }
    builder = builder.default_headers(headers);

    builder
        .build()
        .map_err(|e| AdminError::tls(format!("Failed to build HTTP client: {}", e)))
}
