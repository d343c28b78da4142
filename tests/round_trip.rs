use std::time::Duration;

use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use testhttp::{
    Method, ReqwestRoundTrip, RequestDescriptor, RoundTrip, TransportError, TransportOptions,
};
use url::Url;

fn request(method: Method, url: &str) -> RequestDescriptor {
    RequestDescriptor::new(method, Url::parse(url).unwrap())
}

#[tokio::test]
async fn sends_method_headers_and_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/widgets/7")
                .header("x-trace", "abc")
                .body(r#"{"name":"widget"}"#);
            then.status(202)
                .header("content-type", "application/json")
                .header("x-request-id", "r-1")
                .body(r#"{"updated":true}"#);
        })
        .await;

    let mut descriptor = request(Method::Put, &server.url("/widgets/7"));
    descriptor.append_header("X-Trace", "abc").unwrap();
    descriptor.set_body(r#"{"name":"widget"}"#);

    let response = ReqwestRoundTrip::new().execute(descriptor).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), 202);
    assert_eq!(
        response.headers().get(CONTENT_TYPE),
        Some(&HeaderValue::from_static("application/json"))
    );
    assert_eq!(response.header("X-Request-Id"), Some("r-1"));
    assert_eq!(response.text(), r#"{"updated":true}"#);
}

#[tokio::test]
async fn non_success_statuses_are_returned_not_raised() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/gone");
            then.status(410);
        })
        .await;

    let response = ReqwestRoundTrip::new()
        .execute(request(Method::Delete, &server.url("/gone")))
        .await
        .unwrap();
    assert_eq!(response.status(), 410);
    assert!(response.body().is_empty());
}

#[tokio::test]
async fn default_headers_are_sent_with_every_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(OPTIONS)
                .path("/")
                .header("accept", "application/json");
            then.status(204);
        })
        .await;

    let round_trip = ReqwestRoundTrip::from_options(&TransportOptions {
        timeout: Some(Duration::from_secs(5)),
        default_headers: vec![("accept".to_string(), "application/json".to_string())],
    })
    .unwrap();

    let response = round_trip
        .execute(request(Method::Options, &server.url("/")))
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(response.status(), 204);
}

#[tokio::test]
async fn connection_failures_are_transport_errors() {
    // nothing listens on the discard port
    let err = ReqwestRoundTrip::new()
        .execute(request(Method::Get, "http://127.0.0.1:9/"))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Send { ref method, .. } if method == "GET"));
}
