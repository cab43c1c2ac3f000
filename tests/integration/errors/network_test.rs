// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Integration tests for network failures

use std::sync::Arc;
use std::time::Duration;

use crate::integration::{GATEWAY_PATH, GET_ORGANIZATIONS, MockGateway};
use cordys_admin_client::artifact::StaticArtifactProvider;
use cordys_admin_client::{AdminError, CallerConfig, SoapCaller};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn caller(timeout: Duration) -> SoapCaller<Arc<dyn cordys_admin_client::ArtifactProvider>> {
    let provider = Arc::new(StaticArtifactProvider::new());
    provider.insert("dev", "abc");

    let config = CallerConfig::builder()
        .system("dev")
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
        .expect("Valid config");

    SoapCaller::from_config(&config, provider).expect("Caller creation failed")
}

#[tokio::test]
async fn test_connection_refused() {
    // Use localhost with a port that's likely not listening
    let caller = caller(Duration::from_secs(1));

    let err = caller
        .call("http://127.0.0.1:19999/cordys/com.eibus.web.soap.Gateway.wcp", GET_ORGANIZATIONS)
        .await
        .unwrap_err();

    assert!(
        matches!(err, AdminError::TransportFailure(_)),
        "Should be transport failure, got: {:?}",
        err
    );
}

#[tokio::test]
async fn test_request_timeout() {
    let mock = MockGateway::start().await;

    Mock::given(method("POST"))
        .and(path(GATEWAY_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<late/>")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(mock.inner())
        .await;

    let caller = caller(Duration::from_millis(500));
    let err = caller
        .call(&mock.gateway_url(), GET_ORGANIZATIONS)
        .await
        .unwrap_err();

    assert!(
        matches!(err, AdminError::TransportFailure(_)),
        "Should be transport failure, got: {:?}",
        err
    );
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_dns_resolution_failure() {
    let caller = caller(Duration::from_secs(2));

    let err = caller
        .call(
            "https://this-domain-definitely-does-not-exist-12345.invalid/gateway",
            GET_ORGANIZATIONS,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AdminError::TransportFailure(_)));
}
