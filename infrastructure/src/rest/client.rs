//! [`NlpService`] over JSON/HTTP

use super::error::RestError;
use super::protocol::*;
use askbatch_application::{NlpService, ServiceError};
use askbatch_domain::{
    AccessToken, Credentials, DatasourceId, DatasourceInfo, RequestId, RequestState,
};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, trace};

/// Endpoint used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/api/v1/";

/// REST client for the NLP service
pub struct RestNlpService {
    client: reqwest::Client,
    base_url: String,
}

impl RestNlpService {
    /// Creates a client for `base_url`. A trailing `/` is added when missing.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, RestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_client(builder.build()?, base_url)
    }

    /// Creates the adapter around an existing HTTP client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, RestError> {
        let base_url = base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(RestError::InvalidBaseUrl(base_url.to_string()));
        }

        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts `body` and returns the response object once its status is
    /// `API_OK`.
    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, RestError> {
        let url = format!("{}{}", self.base_url, path);

        // Credentials stay out of the log.
        if path == PATH_SIGNIN {
            trace!("Request prepared: POST {}", url);
        } else {
            let json = serde_json::to_string(body)?;
            trace!("Request prepared: POST {} {}", url, json);
        }

        let response = self.client.post(&url).json(body).send().await?;
        let code = response.status().as_u16();
        let text = response.text().await?;

        trace!("Response received [code={}]: {}", code, text);

        parse_response(code, &text)
    }

    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RestError> {
        let value = self.post(path, body).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Applies the status-code rules and the `API_OK` envelope check.
fn parse_response(code: u16, text: &str) -> Result<Value, RestError> {
    if text.trim().is_empty() {
        return Err(RestError::EmptyResponse { code });
    }

    match code {
        200 => {}
        400 => return Err(RestError::BadRequest(text.to_string())),
        _ => {
            return Err(RestError::UnexpectedResponse {
                code,
                text: text.to_string(),
            });
        }
    }

    let value: Value = serde_json::from_str(text)?;

    match value.get("status").and_then(Value::as_str) {
        Some(STATUS_API_OK) => Ok(value),
        Some(other) => Err(RestError::UnexpectedStatus(other.to_string())),
        None => Err(RestError::MissingField("status")),
    }
}

#[async_trait]
impl NlpService for RestNlpService {
    async fn signin(&self, credentials: &Credentials) -> Result<AccessToken, ServiceError> {
        info!("`user/signin` request sent for: {}", credentials.email);

        let response: SigninResponse = self
            .call(
                PATH_SIGNIN,
                &SigninRequest {
                    email: &credentials.email,
                    passwd: &credentials.password,
                },
            )
            .await?;

        Ok(AccessToken::new(response.access_token))
    }

    async fn signout(&self, token: &AccessToken) -> Result<(), ServiceError> {
        info!("`user/signout` request sent");

        self.post(
            PATH_SIGNOUT,
            &TokenRequest {
                access_token: token.as_str(),
            },
        )
        .await?;
        Ok(())
    }

    async fn create_datasource(
        &self,
        token: &AccessToken,
        model_id: &str,
        name: &str,
    ) -> Result<DatasourceId, ServiceError> {
        info!("`ds/add` request sent for model: {}", model_id);

        let response: AddDatasourceResponse = self
            .call(
                PATH_DS_ADD,
                &AddDatasourceRequest {
                    access_token: token.as_str(),
                    name,
                    short_desc: TEST_DS_DESCRIPTION,
                    mdl_id: model_id,
                    mdl_name: TEST_MODEL_NAME,
                    mdl_ver: TEST_MODEL_VERSION,
                },
            )
            .await?;

        Ok(DatasourceId::new(response.id))
    }

    async fn delete_datasource(
        &self,
        token: &AccessToken,
        datasource_id: DatasourceId,
    ) -> Result<(), ServiceError> {
        info!("`ds/delete` request sent for datasource: {}", datasource_id);

        self.post(
            PATH_DS_DELETE,
            &DeleteDatasourceRequest {
                access_token: token.as_str(),
                id: datasource_id.get(),
            },
        )
        .await?;
        Ok(())
    }

    async fn list_datasources(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<DatasourceInfo>, ServiceError> {
        info!("`ds/all` request sent");

        let response: DatasourcesResponse = self
            .call(
                PATH_DS_ALL,
                &TokenRequest {
                    access_token: token.as_str(),
                },
            )
            .await?;

        Ok(response.data_sources.into_iter().map(Into::into).collect())
    }

    async fn clear_conversation(
        &self,
        token: &AccessToken,
        datasource_id: DatasourceId,
    ) -> Result<(), ServiceError> {
        info!("`clear/conversation` request sent for datasource: {}", datasource_id);

        self.post(
            PATH_CLEAR_CONVERSATION,
            &ClearConversationRequest {
                access_token: token.as_str(),
                ds_id: datasource_id.get(),
            },
        )
        .await?;
        Ok(())
    }

    async fn ask(
        &self,
        token: &AccessToken,
        text: &str,
        datasource_id: DatasourceId,
    ) -> Result<RequestId, ServiceError> {
        info!("`ask` request sent: {} to datasource: {}", text, datasource_id);

        let response: AskResponse = self
            .call(
                PATH_ASK,
                &AskRequest {
                    access_token: token.as_str(),
                    txt: text,
                    ds_id: datasource_id.get(),
                    is_test: true,
                },
            )
            .await?;

        Ok(RequestId::new(response.srv_req_id))
    }

    async fn check(&self, token: &AccessToken) -> Result<Vec<RequestState>, ServiceError> {
        info!("`check` request sent");

        let response: StatesResponse = self
            .call(
                PATH_CHECK,
                &TokenRequest {
                    access_token: token.as_str(),
                },
            )
            .await?;

        Ok(response.states.into_iter().map(Into::into).collect())
    }

    async fn cancel(&self, token: &AccessToken, ids: &[RequestId]) -> Result<(), ServiceError> {
        info!("`cancel` request sent for requests: {:?}", ids);

        self.post(
            PATH_CANCEL,
            &CancelRequest {
                access_token: token.as_str(),
                srv_req_ids: ids.iter().map(RequestId::as_str).collect(),
            },
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askbatch_domain::RequestStatus;
    use axum::Router;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::routing::post;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Scripted endpoint: a canned `(code, body)` per path, every request
    /// recorded.
    #[derive(Default)]
    struct MockEndpoint {
        responses: HashMap<String, (u16, String)>,
        requests: Mutex<Vec<(String, Value)>>,
    }

    impl MockEndpoint {
        fn respond(mut self, path: &str, code: u16, body: impl Into<String>) -> Self {
            self.responses.insert(path.to_string(), (code, body.into()));
            self
        }

        fn ok(self, path: &str, body: Value) -> Self {
            self.respond(path, 200, body.to_string())
        }

        fn requests_to(&self, path: &str) -> Vec<Value> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .filter(|(p, _)| p == path)
                .map(|(_, body)| body.clone())
                .collect()
        }
    }

    async fn handle(
        State(mock): State<Arc<MockEndpoint>>,
        Path(path): Path<String>,
        body: String,
    ) -> (StatusCode, String) {
        let json = serde_json::from_str(&body).unwrap_or(Value::Null);
        mock.requests.lock().unwrap().push((path.clone(), json));

        match mock.responses.get(&path) {
            Some((code, text)) => (StatusCode::from_u16(*code).unwrap(), text.clone()),
            None => (StatusCode::NOT_FOUND, "no such endpoint".to_string()),
        }
    }

    /// Serves `mock` on an ephemeral port and returns the adapter for it.
    async fn serve(mock: MockEndpoint) -> (RestNlpService, Arc<MockEndpoint>) {
        let mock = Arc::new(mock);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new()
            .route("/api/v1/{*path}", post(handle))
            .with_state(mock.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let service =
            RestNlpService::new(&format!("http://{}/api/v1", addr), Some(Duration::from_secs(5)))
                .unwrap();
        (service, mock)
    }

    fn token() -> AccessToken {
        AccessToken::new("tok-1")
    }

    #[tokio::test]
    async fn test_signin_sends_credentials() {
        let (service, mock) = serve(
            MockEndpoint::default().ok(
                "user/signin",
                json!({"status": "API_OK", "accessToken": "tok-1"}),
            ),
        )
        .await;

        let token = service
            .signin(&Credentials::new("me@example.com", "secret"))
            .await
            .unwrap();

        assert_eq!(token.as_str(), "tok-1");
        assert_eq!(
            mock.requests_to("user/signin"),
            vec![json!({"email": "me@example.com", "passwd": "secret"})]
        );
    }

    #[tokio::test]
    async fn test_datasource_lifecycle() {
        let (service, mock) = serve(
            MockEndpoint::default()
                .ok("ds/add", json!({"status": "API_OK", "id": 42}))
                .ok("ds/delete", json!({"status": "API_OK"}))
                .ok(
                    "ds/all",
                    json!({"status": "API_OK", "dataSources": [{"id": 42, "mdlId": "weather", "name": "test-0"}]}),
                ),
        )
        .await;

        let id = service
            .create_datasource(&token(), "weather", "test-0")
            .await
            .unwrap();
        let listing = service.list_datasources(&token()).await.unwrap();
        service.delete_datasource(&token(), id).await.unwrap();

        assert_eq!(id, DatasourceId::new(42));
        assert_eq!(
            listing,
            vec![DatasourceInfo {
                id: DatasourceId::new(42),
                model_id: "weather".into()
            }]
        );
        assert_eq!(
            mock.requests_to("ds/add"),
            vec![json!({
                "accessToken": "tok-1",
                "name": "test-0",
                "shortDesc": "Test datasource",
                "mdlId": "weather",
                "mdlName": "Test model",
                "mdlVer": "Test version"
            })]
        );
        assert_eq!(
            mock.requests_to("ds/delete"),
            vec![json!({"accessToken": "tok-1", "id": 42})]
        );
    }

    #[tokio::test]
    async fn test_ask_check_cancel() {
        let (service, mock) = serve(
            MockEndpoint::default()
                .ok("ask", json!({"status": "API_OK", "srvReqId": "r-1"}))
                .ok(
                    "check",
                    json!({"status": "API_OK", "states": [
                        {"srvReqId": "r-1", "usrId": 1, "dsId": 42, "resType": "json",
                         "resBody": "{\"temp\":21}", "status": "QRY_READY",
                         "createTstamp": 1000, "updateTstamp": 1300},
                        {"srvReqId": "r-2", "usrId": 1, "dsId": 42, "status": "QRY_ENLISTED",
                         "createTstamp": 1000, "updateTstamp": 1000}
                    ]}),
                )
                .ok("cancel", json!({"status": "API_OK"})),
        )
        .await;

        let id = service
            .ask(&token(), "weather in Paris", DatasourceId::new(42))
            .await
            .unwrap();
        let states = service.check(&token()).await.unwrap();
        service
            .cancel(&token(), &[RequestId::new("r-2")])
            .await
            .unwrap();

        assert_eq!(id, RequestId::new("r-1"));
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].status, RequestStatus::Ready);
        assert_eq!(states[0].result_body.as_deref(), Some("{\"temp\":21}"));
        assert_eq!(states[0].processing_time_ms(), 300);
        assert!(!states[1].is_ready());

        assert_eq!(
            mock.requests_to("ask"),
            vec![json!({"accessToken": "tok-1", "txt": "weather in Paris", "dsId": 42, "isTest": true})]
        );
        assert_eq!(
            mock.requests_to("cancel"),
            vec![json!({"accessToken": "tok-1", "srvReqIds": ["r-2"]})]
        );
    }

    #[tokio::test]
    async fn test_clear_conversation_and_signout() {
        let (service, mock) = serve(
            MockEndpoint::default()
                .ok("clear/conversation", json!({"status": "API_OK"}))
                .ok("user/signout", json!({"status": "API_OK"})),
        )
        .await;

        service
            .clear_conversation(&token(), DatasourceId::new(7))
            .await
            .unwrap();
        service.signout(&token()).await.unwrap();

        assert_eq!(
            mock.requests_to("clear/conversation"),
            vec![json!({"accessToken": "tok-1", "dsId": 7})]
        );
        assert_eq!(
            mock.requests_to("user/signout"),
            vec![json!({"accessToken": "tok-1"})]
        );
    }

    #[tokio::test]
    async fn test_bad_request_is_rejection() {
        let (service, _) = serve(MockEndpoint::default().respond(
            "ask",
            400,
            r#"{"status":"NC_INVALID_FIELD","reason":"Unknown datasource"}"#,
        ))
        .await;

        let err = service
            .ask(&token(), "hi", DatasourceId::new(1))
            .await
            .unwrap_err();

        assert!(err.is_rejection());
        assert!(err.to_string().contains("Unknown datasource"));
    }

    #[tokio::test]
    async fn test_unexpected_http_code_is_transport_error() {
        let (service, _) =
            serve(MockEndpoint::default().respond("check", 503, "maintenance")).await;

        let err = service.check(&token()).await.unwrap_err();

        assert_eq!(
            err,
            ServiceError::Transport("Unexpected response [code=503, text=maintenance]".into())
        );
    }

    #[tokio::test]
    async fn test_non_ok_status_is_rejection() {
        let (service, _) = serve(
            MockEndpoint::default().ok("user/signout", json!({"status": "API_FAILED"})),
        )
        .await;

        let err = service.signout(&token()).await.unwrap_err();

        assert_eq!(
            err,
            ServiceError::Rejected("Unexpected message status: API_FAILED".into())
        );
    }

    #[tokio::test]
    async fn test_missing_field_is_malformed() {
        let (service, _) =
            serve(MockEndpoint::default().ok("ds/add", json!({"status": "API_OK"}))).await;

        let err = service
            .create_datasource(&token(), "weather", "test-0")
            .await
            .unwrap_err();

        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_empty_body_is_malformed() {
        let (service, _) = serve(MockEndpoint::default().respond("ask", 200, "")).await;

        let err = service
            .ask(&token(), "hi", DatasourceId::new(1))
            .await
            .unwrap_err();

        assert!(err.is_malformed());
    }

    #[test]
    fn test_base_url_normalization() {
        let service = RestNlpService::new("http://localhost:8081/api/v1", None).unwrap();
        assert_eq!(service.base_url(), DEFAULT_BASE_URL);

        assert!(matches!(
            RestNlpService::new("localhost:8081", None),
            Err(RestError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_parse_response_rules() {
        assert!(matches!(
            parse_response(200, "not json"),
            Err(RestError::InvalidBody(_))
        ));
        assert!(matches!(
            parse_response(200, r#"{"id": 1}"#),
            Err(RestError::MissingField("status"))
        ));
        assert!(parse_response(200, r#"{"status": "API_OK"}"#).is_ok());
    }
}
