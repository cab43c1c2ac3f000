// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)

//! Integration tests for non-200 gateway answers

use crate::integration::{GET_ORGANIZATIONS, MockGateway, SOAP_FAULT, caller_with_artifact};
use cordys_admin_client::AdminError;

#[tokio::test]
async fn test_server_error_carries_status_and_body() {
    let mock = MockGateway::start().await;
    mock.mock_status(500, SOAP_FAULT).await;

    let caller = caller_with_artifact("dev", "abc");
    let err = caller
        .call(&mock.gateway_url(), GET_ORGANIZATIONS)
        .await
        .unwrap_err();

    match err {
        AdminError::HttpStatusFailure {
            status,
            status_line,
            body,
        } => {
            assert_eq!(status, 500);
            assert!(status_line.contains("500"), "status line: {status_line}");
            assert_eq!(body, SOAP_FAULT);
        }
        other => panic!("Expected HttpStatusFailure, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_200_success_codes_fail() {
    for status in [201, 202, 204] {
        let mock = MockGateway::start().await;
        mock.mock_status(status, "").await;

        let caller = caller_with_artifact("dev", "abc");
        let err = caller
            .call(&mock.gateway_url(), GET_ORGANIZATIONS)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(status), "status {status} must be a failure");
    }
}

#[tokio::test]
async fn test_not_found_fails() {
    let mock = MockGateway::start().await;

    let caller = caller_with_artifact("dev", "abc");
    let err = caller
        .call(&format!("{}/no/such/gateway", mock.url()), GET_ORGANIZATIONS)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
}
