#![allow(dead_code)]

use surveycto::types::ServerUrl;
use surveycto::{Credentials, SurveyCtoClient};
use wiremock::matchers::{basic_auth, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

pub type AnyResult = Result<(), Box<dyn std::error::Error>>;

pub const USERNAME: &str = "enumerator@example.org";
pub const PASSWORD: &str = "hunter2";
pub const LINE_BREAK_SETTING: &str = "/api/v1/forms/settings/csv/linebreak";

/// Start a mock SurveyCTO server which accepts line-break settings
/// requests, and a client for it.
pub async fn start() -> (MockServer, SurveyCtoClient) {
    let server = MockServer::start().await;
    Mock::given(path(LINE_BREAK_SETTING))
        .and(basic_auth(USERNAME, PASSWORD))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let client = client_for(&server);
    (server, client)
}

/// Start a mock SurveyCTO server without any mocks, and a client for it.
pub async fn start_bare() -> (MockServer, SurveyCtoClient) {
    let server = MockServer::start().await;
    let client = client_for(&server);
    (server, client)
}

/// Requests received by the server for line-break settings.
pub async fn line_break_requests(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == LINE_BREAK_SETTING)
        .collect()
}

pub fn client_for(server: &MockServer) -> SurveyCtoClient {
    let url = ServerUrl::try_from(server.uri()).unwrap();
    SurveyCtoClient::build(url, Credentials::new(USERNAME, PASSWORD))
        .build()
        .unwrap()
}

/// Requests received by the server, except for line-break settings.
pub async fn data_requests(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() != LINE_BREAK_SETTING)
        .collect()
}

/// Matches requests without an `Authorization` header.
pub struct NoAuthorization;

impl Match for NoAuthorization {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

/// Matches requests with Digest authorization for [USERNAME].
pub struct DigestAuthorization;

impl Match for DigestAuthorization {
    fn matches(&self, request: &Request) -> bool {
        request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with(&format!("Digest username=\"{}\"", USERNAME)))
            .unwrap_or(false)
    }
}

pub fn digest_challenge() -> ResponseTemplate {
    ResponseTemplate::new(401).insert_header(
        "WWW-Authenticate",
        r#"Digest realm="SurveyCTO", qop="auth", nonce="3f1a9c2d7e", opaque="b5e07c""#,
    )
}
