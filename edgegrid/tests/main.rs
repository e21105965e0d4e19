use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{TimeZone, Utc};
use edgegrid::ccu::{Error, PurgeClient, PurgeRequest};
use edgegrid::eg1::{Config, Credential, FixedClock, RequestSigner, StaticCredentialProvider};
use edgegrid::{Context, HttpSend, Signer, StaticEnv};
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, EXPECT};
use http::{Method, StatusCode};
use log::warn;
use pretty_assertions::assert_eq;
use serde_json::json;

const BASE_URL: &str = "https://akaa-baseurl-xxxxxxxxxxx-xxxxxxxxxxxxx.luna.akamaiapis.net/";

/// MockHttpSend records every request and answers with a canned response.
#[derive(Debug, Clone)]
struct MockHttpSend {
    status: StatusCode,
    body: &'static str,
    requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl MockHttpSend {
    fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            requests: Arc::default(),
        }
    }

    fn requests(&self) -> Vec<http::Request<Bytes>> {
        self.requests.lock().unwrap().drain(..).collect()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> edgegrid::Result<http::Response<Bytes>> {
        self.requests.lock().unwrap().push(req);
        Ok(http::Response::builder()
            .status(self.status)
            .body(Bytes::from_static(self.body.as_bytes()))?)
    }
}

fn init_client(http: MockHttpSend) -> PurgeClient {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new().with_http_send(http);
    let loader = StaticCredentialProvider::new(
        "akab-client-token-xxx-xxxxxxxxxxxxxxxx",
        "akab-access-token-xxx-xxxxxxxxxxxxxxxx",
        "SOMESECRET",
    );
    let builder = RequestSigner::new().with_clock(FixedClock::new(
        Utc.with_ymd_and_hms(2014, 3, 21, 19, 34, 21).unwrap(),
        "nonce-xx-xxxx-xxxx-xxxx-xxxxxxxxxxxx",
    ));

    PurgeClient::new(Signer::new(ctx, loader, builder), BASE_URL).unwrap()
}

#[tokio::test]
async fn test_purge_request() -> anyhow::Result<()> {
    let http = MockHttpSend::new(
        StatusCode::CREATED,
        r#"{"httpStatus":201,"detail":"Request accepted.","purgeId":"e535071c-26b2-11e7-94d7-276f2f54d938"}"#,
    );
    let client = init_client(http.clone());

    let resp = client.purge_request(&PurgeRequest::new(["/a"])).await?;
    assert_eq!(
        resp,
        Some(json!({
            "httpStatus": 201,
            "detail": "Request accepted.",
            "purgeId": "e535071c-26b2-11e7-94d7-276f2f54d938",
        }))
    );

    let reqs = http.requests();
    assert_eq!(reqs.len(), 1);
    let req = &reqs[0];
    assert_eq!(req.method(), Method::POST);
    assert_eq!(
        req.uri().to_string(),
        "https://akaa-baseurl-xxxxxxxxxxx-xxxxxxxxxxxxx.luna.akamaiapis.net/ccu/v2/queues/default"
    );
    assert_eq!(req.body().as_ref(), br#"{"objects":["/a"]}"#);
    assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(req.headers()[ACCEPT], "application/json");
    assert_eq!(req.headers()[EXPECT], "");
    assert!(req.headers()[AUTHORIZATION]
        .to_str()?
        .ends_with(";signature=7eju0Wnz01KgLbtPKE88Ibs1fWkv1bVQwWuYkUJHViw="));

    Ok(())
}

#[tokio::test]
async fn test_check_queue_length() -> anyhow::Result<()> {
    let http = MockHttpSend::new(StatusCode::OK, r#"{"httpStatus":200,"queueLength":0}"#);
    let client = init_client(http.clone());

    let resp = client.check_queue_length().await?;
    assert_eq!(resp, Some(json!({"httpStatus": 200, "queueLength": 0})));

    let req = &http.requests()[0];
    assert_eq!(req.method(), Method::GET);
    assert_eq!(req.uri().path(), "/ccu/v2/queues/default");
    assert!(req.body().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_get_purge_status() -> anyhow::Result<()> {
    let http = MockHttpSend::new(StatusCode::OK, "");
    let client = init_client(http.clone());

    let resp = client.get_purge_status("142eac1d-99ab-11e3-945a-7784545a7784").await?;
    assert_eq!(resp, None);

    let req = &http.requests()[0];
    assert_eq!(req.method(), Method::GET);
    assert_eq!(
        req.uri().path(),
        "/ccu/v2/purges/142eac1d-99ab-11e3-945a-7784545a7784"
    );

    let err = client.get_purge_status("../queues/default").await.unwrap_err();
    assert!(matches!(err, Error::Sign(_)));
    assert!(http.requests().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_not_found_is_status_error() {
    let http = MockHttpSend::new(StatusCode::NOT_FOUND, "resource not found");
    let client = init_client(http);

    match client.get_purge_status("1").await {
        Err(Error::Status { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "resource not found");
        }
        v => panic!("unexpected result: {v:?}"),
    }
}

#[tokio::test]
async fn test_success_with_invalid_json_is_malformed() {
    let http = MockHttpSend::new(StatusCode::OK, "not json");
    let client = init_client(http);

    match client.check_queue_length().await {
        Err(Error::MalformedResponse { status, body, .. }) => {
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, "not json");
        }
        v => panic!("unexpected result: {v:?}"),
    }
}

#[tokio::test]
async fn test_missing_credential_sends_nothing() {
    #[derive(Debug)]
    struct NoCredential;

    #[async_trait]
    impl edgegrid::ProvideCredential for NoCredential {
        type Credential = Credential;

        async fn provide_credential(
            &self,
            _: &Context,
        ) -> edgegrid::Result<Option<Self::Credential>> {
            Ok(None)
        }
    }

    let http = MockHttpSend::new(StatusCode::OK, "{}");
    let signer = Signer::new(
        Context::new().with_http_send(http.clone()),
        NoCredential,
        RequestSigner::new(),
    );
    let client = PurgeClient::new(signer, BASE_URL).unwrap();

    match client.check_queue_length().await {
        Err(Error::Sign(err)) => assert!(err.is_credential_error()),
        v => panic!("unexpected result: {v:?}"),
    }
    assert!(http.requests().is_empty());
}

fn env_context(http: MockHttpSend) -> Context {
    Context::new().with_http_send(http).with_env(StaticEnv {
        home_dir: None,
        envs: HashMap::from([
            ("AKAMAI_CLIENT_TOKEN".to_string(), "env-client".to_string()),
            ("AKAMAI_ACCESS_TOKEN".to_string(), "env-access".to_string()),
            ("AKAMAI_CLIENT_SECRET".to_string(), "env-secret".to_string()),
        ]),
    })
}

fn client_token_of(req: &http::Request<Bytes>) -> String {
    let value = req.headers()[AUTHORIZATION].to_str().unwrap();
    value
        .split([' ', ';'])
        .find_map(|kv| kv.strip_prefix("client_token="))
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_from_config_rejects_blank_credential() {
    let _ = env_logger::builder().is_test(true).try_init();

    let http = MockHttpSend::new(StatusCode::OK, "{}");
    let cfg = Config::default()
        .with_base_url(BASE_URL)
        .with_client_token("")
        .with_access_token("cfg-access")
        .with_client_secret("cfg-secret");

    match PurgeClient::from_config(env_context(http.clone()), cfg) {
        Err(Error::Sign(err)) => assert!(err.is_credential_error()),
        v => panic!("unexpected result: {v:?}"),
    }
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_from_config_rejects_partial_credential() {
    let http = MockHttpSend::new(StatusCode::OK, "{}");
    let cfg = Config::default()
        .with_base_url(BASE_URL)
        .with_client_token("cfg-client");

    assert!(matches!(
        PurgeClient::from_config(env_context(http), cfg),
        Err(Error::Sign(_))
    ));
}

#[tokio::test]
async fn test_from_config_credential_source() -> anyhow::Result<()> {
    let http = MockHttpSend::new(StatusCode::OK, "{}");

    let cfg = Config::default()
        .with_base_url(BASE_URL)
        .with_client_token("cfg-client")
        .with_access_token("cfg-access")
        .with_client_secret("cfg-secret");
    PurgeClient::from_config(env_context(http.clone()), cfg)?
        .check_queue_length()
        .await?;
    assert_eq!(client_token_of(&http.requests()[0]), "cfg-client");

    let cfg = Config::default().with_base_url(BASE_URL);
    PurgeClient::from_config(env_context(http.clone()), cfg)?
        .check_queue_length()
        .await?;
    assert_eq!(client_token_of(&http.requests()[0]), "env-client");

    Ok(())
}

#[tokio::test]
async fn test_live_check_queue_length() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("EDGEGRID_CCU_TEST").ok().as_deref() != Some("on") {
        warn!("EDGEGRID_CCU_TEST is not set, skipped");
        return Ok(());
    }

    let base_url = env::var("AKAMAI_BASEURL").expect("env AKAMAI_BASEURL must set");
    let client = edgegrid::default_purge_client(&base_url)?;

    let resp = client.check_queue_length().await?;
    assert!(resp.is_some());
    Ok(())
}
