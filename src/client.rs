use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, Response};
use serde::Deserialize;
use std::env;

use crate::error::{Error, Result};
use crate::observability;
use crate::types::{Attachment, QueryRequest, QueryResponse};

const DEFAULT_QUERY_URL: &str = "http://localhost:8080/query";

/// Fallback message when an error response carries nothing usable.
const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// Substituted when an error body is a markup page rather than text.
const SERVER_ERROR_MESSAGE: &str = "Server error occurred. Please try again later.";

/// Message recorded when a success body does not parse.
const PARSE_FAILURE_MESSAGE: &str = "Invalid response format from server";

/// Backend behavior the session controller dispatches through.
///
/// The controller only needs the two query encodings; putting them behind
/// a trait keeps the dispatch state machine testable without a network.
#[async_trait::async_trait]
pub trait QueryBackend: Send + Sync {
    /// Send a query with no attachment (JSON encoding).
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse>;

    /// Send a query carrying a document (multipart encoding).
    async fn query_with_attachment(
        &self,
        request: &QueryRequest,
        attachment: &Attachment,
    ) -> Result<QueryResponse>;
}

/// Client for the Nyaya consultation backend.
///
/// The backend exposes a single POST endpoint. Queries without an
/// attachment go out as a JSON body; queries with an attachment go out as
/// a multipart form with the raw file under `file` and the serialized
/// payload under `payload`.
#[derive(Debug, Clone)]
pub struct Nyaya {
    client: ReqwestClient,
    query_url: String,
}

impl Nyaya {
    /// Create a new Nyaya client.
    ///
    /// The query URL can be provided directly, read from the
    /// NYAYA_QUERY_URL environment variable, or left to the default local
    /// endpoint. The underlying HTTP client is built without a request
    /// timeout: a dispatch stays pending as long as the backend holds the
    /// connection open.
    pub fn new(query_url: Option<String>) -> Result<Self> {
        let query_url = match query_url {
            Some(url) => url,
            None => env::var("NYAYA_QUERY_URL").unwrap_or_else(|_| DEFAULT_QUERY_URL.to_string()),
        };
        url::Url::parse(&query_url)
            .map_err(|e| Error::url(format!("invalid query URL {query_url}: {e}"), Some(e)))?;

        let client = ReqwestClient::builder().build().map_err(|e| {
            Error::http_client(
                format!("Failed to build HTTP client: {}", e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self { client, query_url })
    }

    /// The endpoint this client posts queries to.
    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    /// Derive the human-readable failure message from an error response.
    ///
    /// Preference order: a structured `error` field from a JSON body, the
    /// generic failure message for JSON bodies without one, a fixed
    /// server-error string for markup bodies, the raw body text, and the
    /// generic failure message for empty bodies.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        #[derive(Deserialize)]
        struct ErrorBody {
            error: Option<String>,
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed
                .error
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            Err(_) if body.starts_with('<') => SERVER_ERROR_MESSAGE.to_string(),
            Err(_) if !body.is_empty() => body,
            Err(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        };

        Error::request_failed(Some(status_code), message)
    }

    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<QueryResponse> {
        observability::CLIENT_REQUESTS.click();

        let response = request.send().await.map_err(|e| {
            observability::CLIENT_REQUEST_ERRORS.click();
            if e.is_connect() {
                Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
            } else {
                Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
            }
        })?;

        if !response.status().is_success() {
            observability::CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        response.json::<QueryResponse>().await.map_err(|e| {
            observability::CLIENT_REQUEST_ERRORS.click();
            Error::response_parse(PARSE_FAILURE_MESSAGE, Some(Box::new(e)))
        })
    }

    /// Send a query with no attachment.
    ///
    /// The payload goes out as a JSON body with
    /// `Content-Type: application/json`.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        self.dispatch(self.client.post(&self.query_url).json(request))
            .await
    }

    /// Send a query carrying a document.
    ///
    /// The body is a multipart form: the raw file bytes under `file` and
    /// the serialized payload string under `payload`. No explicit
    /// content-type header is set beyond the multipart boundary.
    pub async fn query_with_attachment(
        &self,
        request: &QueryRequest,
        attachment: &Attachment,
    ) -> Result<QueryResponse> {
        observability::CLIENT_ATTACHMENT_REQUESTS.click();
        let payload = serde_json::to_string(request)?;
        let file = Part::bytes(attachment.bytes.clone()).file_name(attachment.name.clone());
        let form = Form::new().part("file", file).text("payload", payload);
        self.dispatch(self.client.post(&self.query_url).multipart(form))
            .await
    }
}

#[async_trait::async_trait]
impl QueryBackend for Nyaya {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        Nyaya::query(self, request).await
    }

    async fn query_with_attachment(
        &self,
        request: &QueryRequest,
        attachment: &Attachment,
    ) -> Result<QueryResponse> {
        Nyaya::query_with_attachment(self, request, attachment).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Language, LegalArea, Message, UserType};
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base: &str) -> Nyaya {
        Nyaya::new(Some(format!("{base}/query"))).unwrap()
    }

    fn test_request() -> QueryRequest {
        let history = vec![Message::user("What is an FIR?")];
        QueryRequest::new(
            "What is an FIR?",
            &history,
            Language::English,
            LegalArea::Ipc,
            UserType::Common,
        )
        .unwrap()
    }

    #[test]
    fn client_creation() {
        let client = Nyaya::new(Some("http://backend.example.com/query".to_string())).unwrap();
        assert_eq!(client.query_url(), "http://backend.example.com/query");

        let err = Nyaya::new(Some("not a url".to_string())).unwrap_err();
        assert!(matches!(err, Error::Url { .. }));
    }

    #[tokio::test]
    async fn query_success() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "ai_answer": "<p>An FIR is a First Information Report.</p>",
            "source": "CrPC §154"
        });

        Mock::given(method("POST"))
            .and(path("/query"))
            .and(header("content-type", "application/json"))
            .and(body_string_contains("history_pq"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let response = client.query(&test_request()).await.unwrap();
        assert_eq!(response.source, "CrPC §154");
        assert!(response.ai_answer.contains("First Information Report"));
    }

    #[tokio::test]
    async fn query_error_with_structured_body() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({"error": "legal area not supported"});
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(422).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.query(&test_request()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(422));
        assert_eq!(err.user_message(), "legal area not supported");
    }

    #[tokio::test]
    async fn query_error_json_without_error_field() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(&serde_json::json!({"detail": "nope"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.query(&test_request()).await.unwrap_err();
        assert_eq!(err.user_message(), "Request failed");
    }

    #[tokio::test]
    async fn query_error_with_markup_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_string("<html><body>Internal Server Error</body></html>"),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.query(&test_request()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(
            err.user_message(),
            "Server error occurred. Please try again later."
        );
    }

    #[tokio::test]
    async fn query_error_with_plain_text_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(503).set_body_string("backend warming up"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.query(&test_request()).await.unwrap_err();
        assert_eq!(err.user_message(), "backend warming up");
    }

    #[tokio::test]
    async fn query_error_with_empty_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.query(&test_request()).await.unwrap_err();
        assert_eq!(err.user_message(), "Request failed");
    }

    #[tokio::test]
    async fn query_success_with_unparsable_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.query(&test_request()).await.unwrap_err();
        assert!(err.is_response_parse());
        assert_eq!(err.user_message(), "Invalid response format from server");
    }

    #[tokio::test]
    async fn query_with_attachment_sends_multipart() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "ai_answer": "<p>The notice is valid.</p>",
            "source": "uploaded document"
        });

        Mock::given(method("POST"))
            .and(path("/query"))
            .and(body_string_contains("name=\"file\""))
            .and(body_string_contains("name=\"payload\""))
            .and(body_string_contains("notice.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let attachment = Attachment::new("notice.txt", b"termination notice text".to_vec()).unwrap();
        let response = client
            .query_with_attachment(&test_request(), &attachment)
            .await
            .unwrap();
        assert_eq!(response.source, "uploaded document");
    }

    #[tokio::test]
    async fn connection_failure_maps_to_connection_error() {
        // Port 1 is never listening.
        let client = Nyaya::new(Some("http://127.0.0.1:1/query".to_string())).unwrap();
        let err = client.query(&test_request()).await.unwrap_err();
        assert!(err.is_connection() || matches!(err, Error::HttpClient { .. }));
    }
}
