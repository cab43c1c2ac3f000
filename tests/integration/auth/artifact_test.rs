// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)

//! Integration tests for artifact acquisition

use std::io::Write;
use std::sync::Arc;

use crate::integration::{GET_ORGANIZATIONS, MockGateway, caller_with_artifact};
use cordys_admin_client::artifact::{ArtifactSource, SourceArtifactProvider, StaticArtifactProvider};
use cordys_admin_client::{AdminError, CallerConfig, ReqwestTransport, SoapCaller};

#[tokio::test]
async fn test_missing_artifact_sends_no_request() {
    let mock = MockGateway::start().await;
    mock.expect_no_requests().await;

    let caller = crate::integration::caller_with_provider("dev", Arc::new(StaticArtifactProvider::new()));
    let err = caller
        .call(&mock.gateway_url(), GET_ORGANIZATIONS)
        .await
        .unwrap_err();

    assert!(err.is_authentication_failure(), "got: {err:?}");
}

#[tokio::test]
async fn test_artifact_for_other_system_is_not_used() {
    let mock = MockGateway::start().await;
    mock.expect_no_requests().await;

    let provider = Arc::new(StaticArtifactProvider::new());
    provider.insert("prod", "prod-artifact");
    let caller = crate::integration::caller_with_provider("dev", provider);

    let err = caller
        .call(&mock.gateway_url(), GET_ORGANIZATIONS)
        .await
        .unwrap_err();

    match err {
        AdminError::AuthenticationFailure { system, .. } => assert_eq!(system, "dev"),
        other => panic!("Expected AuthenticationFailure, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_artifact_sends_no_request() {
    let mock = MockGateway::start().await;
    mock.expect_no_requests().await;

    let caller = caller_with_artifact("dev", "");
    let err = caller
        .call(&mock.gateway_url(), GET_ORGANIZATIONS)
        .await
        .unwrap_err();

    assert!(err.is_authentication_failure());
}

#[tokio::test]
async fn test_file_artifact_reread_per_call() {
    let mock = MockGateway::start().await;
    mock.mock_soap_ok("from-file-1", "<one/>").await;
    mock.mock_soap_ok("from-file-2", "<two/>").await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "from-file-1").unwrap();

    let provider = SourceArtifactProvider::new()
        .with_source("dev", ArtifactSource::File(file.path().to_path_buf()));
    let config = CallerConfig::builder().system("dev").build().unwrap();
    let caller = SoapCaller::new("dev", provider, ReqwestTransport::new(&config).unwrap());

    assert_eq!(
        caller.call(&mock.gateway_url(), GET_ORGANIZATIONS).await.unwrap(),
        "<one/>"
    );

    std::fs::write(file.path(), "from-file-2\n").unwrap();
    assert_eq!(
        caller.call(&mock.gateway_url(), GET_ORGANIZATIONS).await.unwrap(),
        "<two/>"
    );
}
