//! Tests for `Client` resource operations.

use super::{Client, ClientError, ExProtoGateway, Gateway, Hook, Phase};
use crate::cancel::CancellationToken;
use crate::time::InstantSleeper;
use crate::transport::{
    ClientConfig, Credentials, HttpClient, HttpError, HttpRequest, HttpResponse, RetryPolicy,
};
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};

/// Scripted broker: pops one result per request and records what it saw.
#[derive(Debug, Default)]
struct ScriptedBroker {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedBroker {
    fn replying(responses: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn status(code: u16) -> Arc<Self> {
        Self::replying(vec![Ok(response(code, ""))])
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn only_request(&self) -> HttpRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl HttpClient for ScriptedBroker {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

fn response(code: u16, body: &str) -> HttpResponse {
    HttpResponse::new(
        http::StatusCode::from_u16(code).unwrap(),
        http::HeaderMap::new(),
        body.as_bytes().to_vec(),
    )
}

fn refused() -> HttpError {
    HttpError::Connection(Box::new(std::io::Error::other("connection refused")))
}

fn client(broker: &Arc<ScriptedBroker>) -> Client<Arc<ScriptedBroker>, InstantSleeper> {
    let config = ClientConfig::new()
        .with_host("broker.local")
        .with_credentials(Credentials::new("admin", "public"));
    Client::new(config, Arc::clone(broker))
        .unwrap()
        .with_sleeper(InstantSleeper)
}

fn audit() -> Hook {
    Hook {
        name: "audit".to_string(),
        enable: true,
        url: "http://127.0.0.1:9000".to_string(),
        pool_size: 8,
        ..Hook::default()
    }
}

fn gateway() -> Gateway {
    ExProtoGateway {
        enable: true,
        ..ExProtoGateway::default()
    }
    .into()
}

fn body_json(request: &HttpRequest) -> serde_json::Value {
    serde_json::from_slice(request.body.as_deref().unwrap()).unwrap()
}

mod accessors {
    use super::*;

    #[test]
    fn exposes_host_port_and_base_url() {
        let broker = ScriptedBroker::status(200);
        let client = client(&broker);

        assert_eq!(client.host(), "broker.local");
        assert_eq!(client.port(), 18083);
        assert_eq!(client.base_url().as_str(), "http://broker.local:18083/api/v5");
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ClientConfig::new().with_port(0);
        assert!(Client::new(config, ScriptedBroker::status(200)).is_err());
    }
}

mod gateway_update {
    use super::*;

    #[tokio::test]
    async fn puts_to_gateway_kind_and_accepts_204() {
        let broker = ScriptedBroker::status(204);

        client(&broker)
            .gateway_update(&CancellationToken::new(), &gateway())
            .await
            .unwrap();

        let request = broker.only_request();
        assert_eq!(request.method, http::Method::PUT);
        assert_eq!(
            request.url.as_str(),
            "http://broker.local:18083/api/v5/gateways/exproto"
        );
        assert_eq!(body_json(&request)["enable"], serde_json::json!(true));
    }

    #[tokio::test]
    async fn rejects_200_because_only_204_is_success() {
        let broker = ScriptedBroker::status(200);

        let err = client(&broker)
            .gateway_update(&CancellationToken::new(), &gateway())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(http::StatusCode::OK));
    }
}

mod hook_create {
    use super::*;

    #[tokio::test]
    async fn posts_to_collection() {
        let broker = ScriptedBroker::status(200);

        client(&broker)
            .hook_create(&CancellationToken::new(), &audit())
            .await
            .unwrap();

        let request = broker.only_request();
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(request.url.as_str(), "http://broker.local:18083/api/v5/exhooks");
        assert_eq!(body_json(&request), serde_json::to_value(audit()).unwrap());
    }

    #[tokio::test]
    async fn sends_auth_and_content_type() {
        let broker = ScriptedBroker::status(200);

        client(&broker)
            .hook_create(&CancellationToken::new(), &audit())
            .await
            .unwrap();

        let request = broker.only_request();
        assert_eq!(
            request.headers.get(http::header::AUTHORIZATION).unwrap(),
            "Basic YWRtaW46cHVibGlj"
        );
        assert_eq!(
            request.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn created_status_is_an_api_error() {
        let broker = ScriptedBroker::replying(vec![Ok(response(201, "created"))]);

        let err = client(&broker)
            .hook_create(&CancellationToken::new(), &audit())
            .await
            .unwrap_err();

        match err {
            ClientError::Api { status, body } => {
                assert_eq!(status, http::StatusCode::CREATED);
                assert_eq!(body, "created");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn conflict_is_not_retried() {
        let broker = ScriptedBroker::replying(vec![Ok(response(
            409,
            r#"{"code":"ALREADY_EXISTS"}"#,
        ))]);

        let err = client(&broker)
            .hook_create(&CancellationToken::new(), &audit())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(http::StatusCode::CONFLICT));
        assert_eq!(broker.requests().len(), 1);
    }

    #[tokio::test]
    async fn retries_connection_failures_until_response() {
        let broker = ScriptedBroker::replying(vec![
            Err(refused()),
            Err(refused()),
            Ok(response(200, "")),
        ]);

        client(&broker)
            .hook_create(&CancellationToken::new(), &audit())
            .await
            .unwrap();

        let requests = broker.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.body == requests[0].body));
    }
}

mod hook_update {
    use super::*;

    #[tokio::test]
    async fn puts_to_named_resource() {
        let broker = ScriptedBroker::status(200);

        client(&broker)
            .hook_update(&CancellationToken::new(), &audit())
            .await
            .unwrap();

        let request = broker.only_request();
        assert_eq!(request.method, http::Method::PUT);
        assert_eq!(
            request.url.as_str(),
            "http://broker.local:18083/api/v5/exhooks/audit"
        );
    }

    #[tokio::test]
    async fn percent_encodes_name() {
        let broker = ScriptedBroker::status(200);
        let hook = Hook {
            name: "a b/c".to_string(),
            ..audit()
        };

        client(&broker)
            .hook_update(&CancellationToken::new(), &hook)
            .await
            .unwrap();

        assert_eq!(
            broker.only_request().url.path(),
            "/api/v5/exhooks/a%20b%2Fc"
        );
    }

    #[tokio::test]
    async fn missing_hook_reports_not_found() {
        let broker = ScriptedBroker::replying(vec![Ok(response(404, "not found"))]);

        let err = client(&broker)
            .hook_update(&CancellationToken::new(), &audit())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(http::StatusCode::NOT_FOUND));
        assert_eq!(err.phase(), Phase::Response);
    }
}

mod hook_get {
    use super::*;

    #[tokio::test]
    async fn decodes_hook() {
        let body = serde_json::to_string(&audit()).unwrap();
        let broker = ScriptedBroker::replying(vec![Ok(response(200, &body))]);

        let hook = client(&broker)
            .hook_get(&CancellationToken::new(), "audit")
            .await
            .unwrap();

        assert_eq!(hook, audit());
        let request = broker.only_request();
        assert_eq!(request.method, http::Method::GET);
        assert_eq!(
            request.url.as_str(),
            "http://broker.local:18083/api/v5/exhooks/audit"
        );
    }

    #[tokio::test]
    async fn malformed_body_is_deserialization_error() {
        let broker = ScriptedBroker::replying(vec![Ok(response(200, "<html>"))]);

        let err = client(&broker)
            .hook_get(&CancellationToken::new(), "audit")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Deserialization(_)));
        assert_eq!(err.phase(), Phase::Response);
    }

    #[tokio::test]
    async fn exhausted_retries_report_transport_error() {
        let broker = ScriptedBroker::replying(vec![Err(refused()), Err(refused())]);
        let config = ClientConfig::new().with_retry(
            RetryPolicy::new().with_max_attempts(NonZeroU32::new(2)),
        );
        let client = Client::new(config, Arc::clone(&broker))
            .unwrap()
            .with_sleeper(InstantSleeper);

        let err = client
            .hook_get(&CancellationToken::new(), "audit")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Transport(HttpError::Connection(_))));
        assert_eq!(err.phase(), Phase::Execute);
        assert_eq!(broker.requests().len(), 2);
    }

    #[tokio::test]
    async fn cancelled_token_stops_after_first_failure() {
        let broker = ScriptedBroker::replying(vec![Err(refused()), Ok(response(200, "{}"))]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = client(&broker).hook_get(&cancel, "audit").await.unwrap_err();

        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(broker.requests().len(), 1);
    }
}
