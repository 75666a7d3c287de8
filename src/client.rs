use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability::{
    CLIENT_RATE_LIMITED, CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS,
    CLIENT_SERVER_ERRORS, CLIENT_TIMEOUTS,
};
use crate::types::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, Model, Reply, Turn,
};

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
const API_KEY_ENV: &str = "GOOGLE_API_KEY";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/////////////////////////////////////////// RemoteModel ///////////////////////////////////////////

/// The remote language model as the chat session sees it.
///
/// Implementations never fail: every outcome, including transport errors, is
/// folded into a [`Reply`].
#[async_trait::async_trait]
pub trait RemoteModel: Send + Sync {
    /// Ask `model` to continue the conversation in `turns`.
    async fn reply(&self, model: &Model, config: GenerationConfig, turns: &[Turn]) -> Reply;
}

////////////////////////////////////////////// Gemini /////////////////////////////////////////////

/// Client for the Gemini `generateContent` API.
#[derive(Clone)]
pub struct Gemini {
    api_key: Option<String>,
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl fmt::Debug for Gemini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gemini")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl Gemini {
    /// Create a new Gemini client.
    ///
    /// The API key can be provided directly or read from the GOOGLE_API_KEY
    /// environment variable.  A missing key is not an error here; every
    /// request made without one fails with an authentication error instead.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_options(api_key, None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = api_key
            .or_else(|| env::var(API_KEY_ENV).ok())
            .filter(|key| !key.is_empty());

        let mut base_url = base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            api_key,
            client,
            base_url,
            timeout,
            logger: None,
        })
    }

    /// Attach a logger that sees every request and response.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// True when an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// The endpoint for `generateContent` on the given model.
    fn endpoint(&self, model: &Model) -> Result<Url> {
        Ok(self
            .base_url
            .join(&format!("models/{model}:generateContent"))?)
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> Result<HeaderMap> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(Error::authentication(format!(
                "API key not provided and {API_KEY_ENV} environment variable not set"
            )));
        };
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|_| Error::authentication("API key contains invalid characters"))?,
        );
        Ok(headers)
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        match response.text().await {
            Ok(body) => error_from_body(status_code, retry_after, &body),
            Err(e) => Error::http_client(
                format!("Failed to read error response: {}", e),
                Some(Box::new(e)),
            ),
        }
    }

    /// Send a `generateContent` request and return the parsed response.
    pub async fn generate_content(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        CLIENT_REQUESTS.click();
        let model_name = model.to_string();
        if let Some(logger) = &self.logger {
            logger.log_request(&model_name, request);
        }
        let start = Instant::now();
        let result = self.generate_content_inner(model, request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        match &result {
            Ok(response) => {
                if let Some(logger) = &self.logger {
                    logger.log_response(&model_name, response);
                }
            }
            Err(err) => {
                CLIENT_REQUEST_ERRORS.click();
                if err.is_rate_limit() {
                    CLIENT_RATE_LIMITED.click();
                } else if err.is_timeout() {
                    CLIENT_TIMEOUTS.click();
                } else if err.is_server_error() {
                    CLIENT_SERVER_ERRORS.click();
                }
                if let Some(logger) = &self.logger {
                    logger.log_error(&model_name, err);
                }
            }
        }
        result
    }

    async fn generate_content_inner(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let headers = self.default_headers()?;
        let url = self.endpoint(model)?;

        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        Some(self.timeout.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| {
                Error::serialization(
                    format!("Failed to parse response: {}", e),
                    Some(Box::new(e)),
                )
            })
    }
}

#[async_trait::async_trait]
impl RemoteModel for Gemini {
    async fn reply(&self, model: &Model, config: GenerationConfig, turns: &[Turn]) -> Reply {
        let request = GenerateContentRequest::from_turns(turns, config);
        match self.generate_content(model, &request).await {
            Ok(response) => Reply::from_response(&response),
            Err(err) => Reply::Failed(err.to_string()),
        }
    }
}

/// Map an error status and body to our Error type.
///
/// Google wraps errors as `{"error": {"code", "message", "status"}}`; any
/// other body is used verbatim as the message.
fn error_from_body(status_code: u16, retry_after: Option<u64>, body: &str) -> Error {
    #[derive(Deserialize)]
    struct ErrorResponse {
        error: Option<ErrorDetail>,
    }

    #[derive(Deserialize)]
    struct ErrorDetail {
        message: Option<String>,
        status: Option<String>,
    }

    let detail = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.error);
    let status = detail.as_ref().and_then(|d| d.status.clone());
    let message = detail
        .and_then(|d| d.message)
        .unwrap_or_else(|| body.to_string());

    match status_code {
        400 => Error::bad_request(message),
        401 => Error::authentication(message),
        403 => Error::permission(message),
        404 => Error::not_found(message),
        408 => Error::timeout(message, None),
        429 => Error::rate_limit(message, retry_after),
        500 => Error::internal_server(message),
        502..=504 => Error::service_unavailable(message, retry_after),
        _ => Error::api(status_code, status, message),
    }
}
