//! JIRA Agile API client implementation.
//!
//! [`JiraClient`] resolves request paths against a base URL, sends requests
//! through a pluggable [`Transport`], and turns responses into decoded
//! values or structured errors. Resource operations live in the service
//! facades returned by [`JiraClient::boards`], [`JiraClient::sprints`] and
//! friends.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Request, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};
use url::Url;

use super::auth::{default_transport, BasicAuthTransport, Transport};
use super::backlog::BacklogService;
use super::boards::BoardsService;
use super::epics::EpicsService;
use super::error::{ApiError, ErrorPayload, ErrorResponse, Result};
use super::issues::IssuesService;
use super::sprints::SprintsService;
use super::types::{Envelope, Pagination};

const MEDIA_TYPE_JSON: &str = "application/json";

/// Body argument for requests that carry none.
pub(crate) const NO_BODY: Option<&'static ()> = None;

/// Metadata of an HTTP response from JIRA.
///
/// List operations fill in `pagination` from the response envelope.
#[derive(Debug, Clone)]
pub struct Response {
    /// Method of the request that produced this response.
    pub method: Method,
    /// Final URL of the request.
    pub url: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub pagination: Pagination,
}

/// Destination for a successful response body.
pub trait Sink: Send {
    /// Receive the complete body of a 2xx response.
    fn consume(&mut self, body: &[u8]) -> Result<()>;
}

/// Decode the body as JSON into the wrapped value.
///
/// An empty body is not an error; the value is left as it was.
pub struct Json<'a, T>(pub &'a mut T);

impl<T: DeserializeOwned + Send> Sink for Json<'_, T> {
    fn consume(&mut self, body: &[u8]) -> Result<()> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        *self.0 = serde_json::from_slice(body).map_err(ApiError::Decode)?;
        Ok(())
    }
}

/// Copy the body verbatim into a writer.
pub struct Raw<'a, W>(pub &'a mut W);

impl<W: Write + Send> Sink for Raw<'_, W> {
    fn consume(&mut self, body: &[u8]) -> Result<()> {
        self.0.write_all(body)?;
        Ok(())
    }
}

/// Ignore the body.
pub struct Discard;

impl Sink for Discard {
    fn consume(&mut self, _body: &[u8]) -> Result<()> {
        Ok(())
    }
}

/// The JIRA Agile API client.
///
/// Immutable once built and safe to share between tasks (wrap it in an
/// `Arc`). Every call takes a [`CancellationToken`]; cancelling it aborts
/// the in-flight request with [`ApiError::Cancelled`].
#[derive(Clone)]
pub struct JiraClient {
    /// Sends requests; usually authenticating.
    transport: Arc<dyn Transport>,
    /// Base URL for all request paths. Always ends with `/`.
    base_url: Url,
}

impl JiraClient {
    /// Create a client for the Agile API rooted at `base_url`.
    ///
    /// `base_url` is normally `https://{host}/rest/agile/1.0/`; a missing
    /// trailing slash is added. Without a transport the process-wide
    /// default HTTP client is used, which sends requests unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if `base_url` cannot be parsed.
    pub fn new(base_url: &str, transport: Option<Arc<dyn Transport>>) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let transport =
            transport.unwrap_or_else(|| Arc::new(default_transport().clone()) as Arc<dyn Transport>);

        Ok(Self {
            transport,
            base_url,
        })
    }

    /// Create a client that authenticates with HTTP Basic Auth.
    pub fn with_basic_auth(base_url: &str, username: &str, password: &str) -> Result<Self> {
        let auth = BasicAuthTransport::new(username, password)?;
        Self::new(base_url, Some(Arc::new(auth)))
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Replace the base URL.
    ///
    /// The URL is taken as is; requests fail with
    /// `ApiError::InvalidBaseUrl` until it ends with a slash.
    pub fn set_base_url(&mut self, base_url: Url) {
        self.base_url = base_url;
    }

    /// Operations on boards.
    pub fn boards(&self) -> BoardsService<'_> {
        BoardsService::new(self)
    }

    /// Operations on sprints.
    pub fn sprints(&self) -> SprintsService<'_> {
        SprintsService::new(self)
    }

    /// Operations on epics.
    pub fn epics(&self) -> EpicsService<'_> {
        EpicsService::new(self)
    }

    /// Operations on the backlog.
    pub fn backlog(&self) -> BacklogService<'_> {
        BacklogService::new(self)
    }

    /// Operations on single issues.
    pub fn issues(&self) -> IssuesService<'_> {
        IssuesService::new(self)
    }

    /// Build a request for `path`, resolved against the base URL.
    ///
    /// `path` is relative and may carry a query string. A body is encoded
    /// as JSON.
    ///
    /// # Errors
    ///
    /// - `ApiError::InvalidBaseUrl` if the base URL lacks a trailing slash
    /// - `ApiError::InvalidUrl` if `path` cannot be resolved
    /// - `ApiError::Encode` if the body cannot be serialized
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Request> {
        if !self.base_url.path().ends_with('/') {
            return Err(ApiError::InvalidBaseUrl(self.base_url.to_string()));
        }
        let url = self.base_url.join(path)?;

        let mut request = Request::new(method, url);
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(ApiError::Encode)?;
            request
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE_JSON));
            *request.body_mut() = Some(bytes.into());
        }
        request
            .headers_mut()
            .insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE_JSON));

        Ok(request)
    }

    /// Send `request` and hand a successful body to `sink`.
    ///
    /// Non-2xx answers become `ApiError::Remote`, carrying JIRA's error
    /// messages when the body has the usual shape. Cancellation of `ctx`
    /// takes precedence over any transport error.
    #[instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn send(
        &self,
        ctx: &CancellationToken,
        request: Request,
        sink: &mut dyn Sink,
    ) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!("Sending request");

        let http = tokio::select! {
            biased;
            _ = ctx.cancelled() => return Err(ApiError::Cancelled),
            result = self.transport.round_trip(request) => match result {
                Ok(http) => http,
                Err(_) if ctx.is_cancelled() => return Err(ApiError::Cancelled),
                Err(e) => return Err(ApiError::Network(e)),
            },
        };

        let response = Response {
            method,
            url,
            status: http.status(),
            headers: http.headers().clone(),
            pagination: Pagination::default(),
        };

        let body = tokio::select! {
            biased;
            _ = ctx.cancelled() => return Err(ApiError::Cancelled),
            body = http.bytes() => match body {
                Ok(body) => body,
                // An unreadable error body still yields the remote error.
                Err(e) if !response.status.is_success() => {
                    warn!("Could not read error body: {}", e);
                    Default::default()
                }
                Err(e) => return Err(ApiError::Network(e)),
            },
        };
        debug!(status = response.status.as_u16(), bytes = body.len(), "Received response");

        if !response.status.is_success() {
            debug!("Error response body: {}", String::from_utf8_lossy(&body));
            let payload = if body.is_empty() {
                ErrorPayload::default()
            } else {
                serde_json::from_slice(&body).unwrap_or_else(|e| {
                    warn!("Could not decode error body: {}", e);
                    ErrorPayload::default()
                })
            };
            let mut error = ErrorResponse::new(response);
            error.messages = payload.messages;
            error.errors = payload.errors;
            return Err(ApiError::Remote(Box::new(error)));
        }

        sink.consume(&body)?;
        Ok(response)
    }

    /// Send `request` and decode the body into a `T`.
    pub(crate) async fn fetch<T>(
        &self,
        ctx: &CancellationToken,
        request: Request,
    ) -> Result<(T, Response)>
    where
        T: DeserializeOwned + Default + Send,
    {
        let mut value = T::default();
        let response = self.send(ctx, request, &mut Json(&mut value)).await?;
        Ok((value, response))
    }

    /// Send `request`, decode a collection envelope and copy its paging
    /// information onto the response.
    pub(crate) async fn fetch_page<W>(
        &self,
        ctx: &CancellationToken,
        request: Request,
    ) -> Result<(Vec<W::Item>, Response)>
    where
        W: Envelope + DeserializeOwned + Default + Send,
    {
        let (envelope, mut response) = self.fetch::<W>(ctx, request).await?;
        let (pagination, items) = envelope.into_parts();
        response.pagination = pagination;
        debug!(count = items.len(), is_last = pagination.is_last, "Fetched page");
        Ok((items, response))
    }

    /// `GET path` and decode a collection envelope.
    pub(crate) async fn get_page<W>(
        &self,
        ctx: &CancellationToken,
        path: &str,
    ) -> Result<(Vec<W::Item>, Response)>
    where
        W: Envelope + DeserializeOwned + Default + Send,
    {
        let request = self.new_request(Method::GET, path, NO_BODY)?;
        self.fetch_page::<W>(ctx, request).await
    }

    /// Send `request` and ignore the body.
    pub(crate) async fn execute(
        &self,
        ctx: &CancellationToken,
        request: Request,
    ) -> Result<Response> {
        self.send(ctx, request, &mut Discard).await
    }

    /// Send an issue-move request. JIRA answers a completed move with
    /// `204 No Content`; any other 2xx status yields `false`.
    pub(crate) async fn move_issues(
        &self,
        ctx: &CancellationToken,
        request: Request,
    ) -> Result<(bool, Response)> {
        let response = self.execute(ctx, request).await?;
        Ok((response.status == StatusCode::NO_CONTENT, response))
    }
}

impl fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{base_path, setup};
    use crate::api::types::Board;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[test]
    fn test_new_appends_trailing_slash() {
        let client = JiraClient::new("https://jira.com/rest/agile/1.0", None).unwrap();
        assert_eq!(client.base_url().as_str(), "https://jira.com/rest/agile/1.0/");

        let client = JiraClient::new("https://jira.com/rest/agile/1.0/", None).unwrap();
        assert_eq!(client.base_url().as_str(), "https://jira.com/rest/agile/1.0/");
    }

    #[test]
    fn test_new_rejects_unparseable_url() {
        let err = JiraClient::new("not a url", None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_new_request() {
        let client = JiraClient::new("https://jira.com/rest/agile/1.0/", None).unwrap();
        let body = serde_json::json!({"name": "Sprint 001"});

        let request = client
            .new_request(Method::POST, "sprint?x=1", Some(&body))
            .unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://jira.com/rest/agile/1.0/sprint?x=1"
        );
        assert_eq!(request.headers()[CONTENT_TYPE], MEDIA_TYPE_JSON);
        assert_eq!(request.headers()[ACCEPT], MEDIA_TYPE_JSON);
        assert_eq!(
            request.body().unwrap().as_bytes().unwrap(),
            br#"{"name":"Sprint 001"}"#
        );
    }

    #[test]
    fn test_new_request_without_body() {
        let client = JiraClient::new("https://jira.com/rest/agile/1.0/", None).unwrap();
        let request = client.new_request(Method::GET, "board/1", NO_BODY).unwrap();

        assert!(request.body().is_none());
        assert!(request.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(request.headers()[ACCEPT], MEDIA_TYPE_JSON);
    }

    #[test]
    fn test_new_request_does_not_escape_html() {
        let client = JiraClient::new("https://jira.com/rest/agile/1.0/", None).unwrap();
        let body = serde_json::json!({"jql": "a < b && c > d"});

        let request = client.new_request(Method::POST, "x", Some(&body)).unwrap();
        assert_eq!(
            request.body().unwrap().as_bytes().unwrap(),
            br#"{"jql":"a < b && c > d"}"#
        );
    }

    #[test]
    fn test_new_request_requires_trailing_slash() {
        let mut client = JiraClient::new("https://jira.com/rest/agile/1.0/", None).unwrap();
        client.set_base_url(Url::parse("https://jira.com/rest/agile/1.0").unwrap());

        let err = client.new_request(Method::GET, "board", NO_BODY).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
        assert!(err.to_string().contains("trailing slash"));
    }

    #[test]
    fn test_new_request_bad_path() {
        let client = JiraClient::new("https://jira.com/rest/agile/1.0/", None).unwrap();
        let err = client
            .new_request(Method::GET, "http://[::1", NO_BODY)
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_debug_shows_base_url() {
        let client = JiraClient::new("https://jira.com/rest/agile/1.0/", None).unwrap();
        assert!(format!("{:?}", client).contains("https://jira.com/rest/agile/1.0/"));
    }

    #[tokio::test]
    async fn test_send_decodes_json() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path(base_path("board/42")))
            .and(header("accept", MEDIA_TYPE_JSON))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": 42, "name": "MTD board", "type": "scrum"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = client.new_request(Method::GET, "board/42", NO_BODY).unwrap();
        let mut board = Board::default();
        let response = client
            .send(&CancellationToken::new(), request, &mut Json(&mut board))
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.method, Method::GET);
        assert_eq!(response.pagination, Pagination::default());
        assert_eq!(board.id, 42);
        assert_eq!(board.board_type, "scrum");
    }

    #[tokio::test]
    async fn test_send_sends_json_body() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path(base_path("sprint")))
            .and(header("content-type", MEDIA_TYPE_JSON))
            .and(body_json(serde_json::json!({"name": "Sprint 001"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let request = client
            .new_request(Method::POST, "sprint", Some(&serde_json::json!({"name": "Sprint 001"})))
            .unwrap();
        let response = client
            .execute(&CancellationToken::new(), request)
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_send_empty_body_is_success() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path(base_path("board/1")))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let request = client.new_request(Method::GET, "board/1", NO_BODY).unwrap();
        let (board, response) = client
            .fetch::<Board>(&CancellationToken::new(), request)
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(board, Board::default());
    }

    #[tokio::test]
    async fn test_send_undecodable_success_body() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path(base_path("board/1")))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let request = client.new_request(Method::GET, "board/1", NO_BODY).unwrap();
        let err = client
            .fetch::<Board>(&CancellationToken::new(), request)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_send_structured_remote_error() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path(base_path("board/999")))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "errorMessages": ["Board does not exist or you do not have permission to see it."],
                "errors": {"rapidViewId": "invalid"}
            })))
            .mount(&server)
            .await;

        let request = client.new_request(Method::GET, "board/999", NO_BODY).unwrap();
        let err = client
            .fetch::<Board>(&CancellationToken::new(), request)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        let remote = err.error_response().unwrap();
        assert_eq!(
            remote.messages,
            vec!["Board does not exist or you do not have permission to see it.".to_string()]
        );
        assert_eq!(remote.errors["rapidViewId"], "invalid");
        assert_eq!(remote.response.method, Method::GET);
        assert!(remote.response.url.as_str().ends_with("/rest/agile/1.0/board/999"));
        assert!(err.to_string().contains(": 404 "));
    }

    #[tokio::test]
    async fn test_send_unstructured_remote_error() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path(base_path("board/1")))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal failure"))
            .mount(&server)
            .await;

        let request = client.new_request(Method::GET, "board/1", NO_BODY).unwrap();
        let err = client
            .execute(&CancellationToken::new(), request)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        let remote = err.error_response().unwrap();
        assert!(remote.messages.is_empty());
        assert!(remote.errors.is_empty());
    }

    #[tokio::test]
    async fn test_send_raw_sink() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path(base_path("board/1")))
            .respond_with(ResponseTemplate::new(200).set_body_string("plain text body"))
            .mount(&server)
            .await;

        let request = client.new_request(Method::GET, "board/1", NO_BODY).unwrap();
        let mut buffer: Vec<u8> = Vec::new();
        client
            .send(&CancellationToken::new(), request, &mut Raw(&mut buffer))
            .await
            .unwrap();
        assert_eq!(buffer, b"plain text body");
    }

    #[tokio::test]
    async fn test_move_issues_status_semantics() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path(base_path("backlog/issue")))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(base_path("sprint/1/issue")))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let ctx = CancellationToken::new();
        let request = client.new_request(Method::POST, "backlog/issue", NO_BODY).unwrap();
        let (moved, _) = client.move_issues(&ctx, request).await.unwrap();
        assert!(moved);

        let request = client.new_request(Method::POST, "sprint/1/issue", NO_BODY).unwrap();
        let (moved, response) = client.move_issues(&ctx, request).await.unwrap();
        assert!(!moved);
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_send_already_cancelled() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let ctx = CancellationToken::new();
        ctx.cancel();
        let request = client.new_request(Method::GET, "board", NO_BODY).unwrap();
        let err = client.execute(&ctx, request).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_send_cancelled_in_flight() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path(base_path("board")))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
            .mount(&server)
            .await;

        let ctx = CancellationToken::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let request = client.new_request(Method::GET, "board", NO_BODY).unwrap();
        let err = client.execute(&ctx, request).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_send_network_error() {
        let client = JiraClient::new("http://127.0.0.1:1/rest/agile/1.0/", None).unwrap();
        let request = client.new_request(Method::GET, "board", NO_BODY).unwrap();
        let err = client
            .execute(&CancellationToken::new(), request)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_send_remote_error_keeps_messages_with_malformed_errors() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path(base_path("sprint")))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "errorMessages": ["Sprint name is too long"],
                "errors": {"startDate": null, "endDate": 3}
            })))
            .mount(&server)
            .await;

        let request = client
            .new_request(Method::POST, "sprint", Some(&serde_json::json!({"name": "x"})))
            .unwrap();
        let err = client
            .execute(&CancellationToken::new(), request)
            .await
            .unwrap_err();

        let remote = err.error_response().unwrap();
        assert_eq!(remote.messages, vec!["Sprint name is too long".to_string()]);
        assert_eq!(remote.errors.get("startDate").map(String::as_str), Some(""));
        assert!(!remote.errors.contains_key("endDate"));
    }

    /// Serve one response whose body is cut short of its declared length.
    async fn truncated_body_server(status_line: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let head = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{{\"errorMes",
                status_line
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}/rest/agile/1.0/", addr)
    }

    #[tokio::test]
    async fn test_send_unreadable_error_body_is_remote_error() {
        let base_url = truncated_body_server("HTTP/1.1 500 Internal Server Error").await;
        let client = JiraClient::new(&base_url, Some(Arc::new(reqwest::Client::new()))).unwrap();
        let request = client.new_request(Method::GET, "board/1", NO_BODY).unwrap();

        let err = client
            .execute(&CancellationToken::new(), request)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        let remote = err.error_response().unwrap();
        assert!(remote.messages.is_empty());
        assert!(remote.errors.is_empty());
    }

    #[tokio::test]
    async fn test_send_unreadable_success_body_is_network_error() {
        let base_url = truncated_body_server("HTTP/1.1 200 OK").await;
        let client = JiraClient::new(&base_url, Some(Arc::new(reqwest::Client::new()))).unwrap();
        let request = client.new_request(Method::GET, "board/1", NO_BODY).unwrap();

        let err = client
            .fetch::<Board>(&CancellationToken::new(), request)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_concurrent_calls_share_client() {
        let (server, client) = setup().await;
        for id in 0..8 {
            Mock::given(method("GET"))
                .and(path(base_path(&format!("board/{}", id))))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_delay(Duration::from_millis(10 * (8 - id)))
                        .set_body_json(serde_json::json!({"id": id, "name": format!("Board {}", id)})),
                )
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = Arc::new(client);
        let ctx = CancellationToken::new();
        let handles: Vec<_> = (0..8_i64)
            .map(|id| {
                let client = Arc::clone(&client);
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    let request =
                        client.new_request(Method::GET, &format!("board/{}", id), NO_BODY)?;
                    let result = client.fetch::<Board>(&ctx, request).await;
                    result.map(|(board, response)| (id, board, response))
                })
            })
            .collect();

        for handle in handles {
            let (id, board, response) = handle.await.unwrap().unwrap();
            assert_eq!(board.id, id);
            assert_eq!(board.name, format!("Board {}", id));
            assert!(response.url.path().ends_with(&format!("board/{}", id)));
        }
    }
}
