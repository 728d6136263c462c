//! Integration tests for the Lightsail HTTP client using wiremock
//!
//! These tests verify the wire protocol (target header, signing, paging
//! body) and error classification against mocked endpoints.

use aws_credential_types::Credentials;
use enum_lightsail::aws::auth::AwsCredentials;
use enum_lightsail::aws::client::LightsailClient;
use enum_lightsail::aws::error::ApiError;
use enum_lightsail::aws::http::LightsailHttpClient;
use enum_lightsail::aws::regions;
use enum_lightsail::progress::TracingProgress;
use enum_lightsail::resource::{self, fetch_resources, Category, LightsailApi};
use enum_lightsail::testing::MemorySession;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, header_exists, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer, region: &str) -> LightsailClient {
    let credentials = AwsCredentials::from_static(Credentials::new(
        "AKIDEXAMPLE",
        "secret",
        None,
        None,
        "test",
    ));
    let http = LightsailHttpClient::new(Duration::from_secs(5)).expect("http client");
    LightsailClient::with_parts(credentials, http, region, Some(format!("{}/", server.uri())))
}

fn target(action: &str) -> String {
    format!("Lightsail_20161128.{action}")
}

/// Test module for HTTP client integration tests
mod http_client_tests {
    use super::*;

    /// A list call is a signed JSON 1.1 POST with the action in the target header
    #[tokio::test]
    async fn test_get_page_sends_signed_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("x-amz-target", target("GetInstances").as_str()))
            .and(header("content-type", "application/x-amz-json-1.1"))
            .and(header_exists("x-amz-date"))
            .and(header_regex(
                "authorization",
                r"^AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/\d{8}/us-east-1/lightsail/aws4_request",
            ))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "instances": [{"name": "web-1"}, {"name": "web-2"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, "us-east-1");
        let response = client
            .get_page(Category::Instances, None)
            .await
            .expect("Request should succeed");

        assert_eq!(response["instances"].as_array().unwrap().len(), 2);
        assert_eq!(response["instances"][0]["name"], "web-1");
    }

    /// Follow-up pages carry the token in the body
    #[tokio::test]
    async fn test_pagination_over_http() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("x-amz-target", target("GetDiskSnapshots").as_str()))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "diskSnapshots": [{"name": "snap-1"}],
                "nextPageToken": "page-2"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(header("x-amz-target", target("GetDiskSnapshots").as_str()))
            .and(body_json(json!({"pageToken": "page-2"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "diskSnapshots": [{"name": "snap-2"}, {"name": "snap-3"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, "us-east-1");
        let items = fetch_resources(&client, Category::DiskSnapshots)
            .await
            .expect("Pagination should succeed");

        let names: Vec<&str> = items.iter().map(|i| i["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["snap-1", "snap-2", "snap-3"]);
    }

    /// Test access denied is classified from the __type field
    #[tokio::test]
    async fn test_access_denied_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "AccessDeniedException",
                "message": "User: arn:aws:iam::123456789012:user/test is not authorized"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server, "us-east-1");
        let err = client
            .get_page(Category::KeyPairs, None)
            .await
            .expect_err("Request should fail");

        assert!(err.is_access_denied());
        assert_eq!(err.code(), Some("AccessDeniedException"));
    }

    /// Test other service errors keep their code and status
    #[tokio::test]
    async fn test_service_error_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .insert_header("x-amzn-ErrorType", "InvalidInputException:http://internal/")
                    .set_body_json(json!({"message": "Invalid page token"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server, "us-east-1");
        let err = client
            .get_page(Category::Bundles, Some("bogus"))
            .await
            .expect_err("Request should fail");

        match err {
            ApiError::Service { status, code, message } => {
                assert_eq!(status, 400);
                assert_eq!(code.as_deref(), Some("InvalidInputException"));
                assert_eq!(message, "Invalid page token");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// Test malformed success bodies are decode errors
    #[tokio::test]
    async fn test_malformed_json_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json {"))
            .mount(&server)
            .await;

        let client = test_client(&server, "us-east-1");
        let err = client
            .get_page(Category::Disks, None)
            .await
            .expect_err("Parsing should fail");

        assert!(matches!(err, ApiError::Decode(_)));
    }
}

/// Test module for region discovery
mod region_tests {
    use super::*;

    #[tokio::test]
    async fn test_discover_regions_from_api() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("x-amz-target", target("GetRegions").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "regions": [{"name": "us-east-1"}, {"name": "eu-central-1"}]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server, "us-east-1");
        assert_eq!(
            regions::discover_regions(&client).await,
            vec!["us-east-1", "eu-central-1"]
        );
    }

    #[tokio::test]
    async fn test_discover_regions_falls_back_on_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "AccessDeniedException",
                "message": "denied"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server, "us-east-1");
        assert_eq!(
            regions::discover_regions(&client).await,
            regions::static_regions()
        );
    }
}

/// End-to-end run against the mock endpoint, telling regions apart by the
/// credential scope in the signature
mod end_to_end_tests {
    use super::*;

    #[tokio::test]
    async fn test_run_across_two_regions() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("x-amz-target", target("GetInstances").as_str()))
            .and(header_regex("authorization", "/us-east-1/lightsail/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "instances": [{"name": "r1"}, {"name": "r2"}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(header("x-amz-target", target("GetInstances").as_str()))
            .and(header_regex("authorization", "/us-west-2/lightsail/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "AccessDeniedException",
                "message": "denied"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server, "us-east-1");
        let mut session = MemorySession::default();
        let regions = vec!["us-east-1".to_string(), "us-west-2".to_string()];

        let counts = resource::run(
            &client,
            &mut session,
            &[Category::Instances],
            &regions,
            &TracingProgress,
        )
        .await
        .expect("run should succeed");

        assert_eq!(counts.get(&Category::Instances), Some(&2));
        assert_eq!(
            session.data.get("Lightsail"),
            Some(&json!({
                "us-east-1": {"instances": [{"name": "r1"}, {"name": "r2"}]},
                "us-west-2": {"instances": []}
            }))
        );
    }
}
