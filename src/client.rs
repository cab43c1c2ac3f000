//! Authenticated SOAP invocation.
//!
//! This module provides [`SoapCaller`], which turns "call this SOAP operation
//! on system X" into one authenticated HTTP POST against the system's gateway.

use std::sync::Arc;

use url::Url;

use crate::artifact::ArtifactProvider;
use crate::config::CallerConfig;
use crate::error::{AdminError, Result};
use crate::query::{self, QueryParams};
use crate::transport::{HttpTransport, ReqwestTransport, SoapRequest};

/// Query parameter carrying the SAML artifact.
pub const ARTIFACT_PARAM: &str = "SAMLart";

/// SOAP caller bound to one target system.
///
/// Every call fetches a fresh artifact from the provider, puts it first in
/// the query string under [`ARTIFACT_PARAM`], and posts the SOAP body as
/// `text/xml; charset=UTF-8`. Only `200 OK` counts as success; the response
/// body is returned untouched, SOAP faults included.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use cordys_admin_client::{CallerConfig, SoapCaller};
/// use cordys_admin_client::artifact::StaticArtifactProvider;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = Arc::new(StaticArtifactProvider::new());
/// provider.insert("dev", "AAQAAK7Y...");
///
/// let config = CallerConfig::builder().system("dev").build()?;
/// let caller = SoapCaller::from_config(&config, provider)?;
///
/// let response = caller
///     .call(
///         "https://cordys.example.com/cordys/com.eibus.web.soap.Gateway.wcp",
///         "<SOAP:Envelope xmlns:SOAP=\"http://schemas.xmlsoap.org/soap/envelope/\">...</SOAP:Envelope>",
///     )
///     .await?;
/// println!("{response}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SoapCaller<P, T = ReqwestTransport> {
    system: String,
    provider: P,
    transport: T,
}

impl SoapCaller<Arc<dyn ArtifactProvider>, ReqwestTransport> {
    /// Create a caller using the reqwest transport built from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if TLS configuration fails.
    pub fn from_config(config: &CallerConfig, provider: Arc<dyn ArtifactProvider>) -> Result<Self> {
        let transport = ReqwestTransport::new(config)?;

        Ok(Self::new(config.system.clone(), provider, transport))
    }
}

impl<P, T> SoapCaller<P, T>
where
    P: ArtifactProvider,
    T: HttpTransport,
{
    /// Create a caller from its parts.
    pub fn new(system: impl Into<String>, provider: P, transport: T) -> Self {
        Self {
            system: system.into(),
            provider,
            transport,
        }
    }

    /// Name of the target system this caller authenticates against.
    pub fn system(&self) -> &str {
        &self.system
    }

    /// Invoke a SOAP operation with no extra query parameters.
    pub async fn call(&self, url: &str, soap_body: &str) -> Result<String> {
        self.call_with_params(url, soap_body, &QueryParams::new())
            .await
    }

    /// Invoke a SOAP operation with extra query parameters.
    ///
    /// Parameters already present in `url` come first, then `extra_params`
    /// in the caller's order; a later value for the same key wins. The
    /// artifact always leads the query string, and any other value under
    /// [`ARTIFACT_PARAM`] is discarded.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Url`] if `url` does not parse.
    /// - [`AdminError::AuthenticationFailure`] if no artifact is available;
    ///   nothing is sent in that case.
    /// - [`AdminError::TransportFailure`] on connection or I/O errors.
    /// - [`AdminError::HttpStatusFailure`] for any status other than `200 OK`.
    pub async fn call_with_params(
        &self,
        url: &str,
        soap_body: &str,
        extra_params: &QueryParams,
    ) -> Result<String> {
        let mut url = Url::parse(url)?;
        let artifact = self.fetch_artifact().await?;

        let mut params: QueryParams = url.query_pairs().into_owned().collect();
        params.extend(extra_params.iter().map(|(k, v)| (k.clone(), v.clone())));
        url.set_query(None);

        let query = authenticated_query(artifact, &params);
        tracing::debug!(
            system = %self.system,
            "POST {}?{}",
            url,
            query::encode(&redacted(&query))
        );

        let request = SoapRequest {
            url,
            query: query.into_iter().collect(),
            body: soap_body.to_string(),
        };

        let response = self.transport.post(request).await?;

        if !response.is_ok() {
            tracing::warn!(
                system = %self.system,
                status = response.status,
                "Gateway rejected SOAP request"
            );
            return Err(AdminError::http_status(
                response.status,
                response.status_line,
                response.body,
            ));
        }

        tracing::debug!(system = %self.system, bytes = response.body.len(), "SOAP response received");
        Ok(response.body)
    }

    /// Fetch the current artifact, mapping any absence to an authentication failure.
    async fn fetch_artifact(&self) -> Result<String> {
        match self.provider.artifact(&self.system).await {
            Ok(artifact) if artifact.is_empty() => Err(AdminError::authentication_failure(
                &self.system,
                "artifact provider returned an empty artifact",
            )),
            Ok(artifact) => Ok(artifact),
            Err(err) => {
                tracing::warn!(system = %self.system, error = %err, "No authentication artifact");
                let reason = match err {
                    AdminError::ArtifactUnavailable { reason, .. } => reason,
                    other => other.to_string(),
                };
                Err(AdminError::authentication_failure(&self.system, reason))
            }
        }
    }
}

/// Build the query set for one call: artifact first, then caller parameters.
fn authenticated_query(artifact: String, extra_params: &QueryParams) -> QueryParams {
    let mut query = QueryParams::with_capacity(extra_params.len() + 1);
    query.insert(ARTIFACT_PARAM.to_string(), artifact);

    for (key, value) in extra_params {
        if key != ARTIFACT_PARAM {
            query.insert(key.clone(), value.clone());
        }
    }

    query
}

fn redacted(query: &QueryParams) -> QueryParams {
    let mut copy = query.clone();
    if let Some(value) = copy.get_mut(ARTIFACT_PARAM) {
        *value = "***".to_string();
    }
    copy
}
