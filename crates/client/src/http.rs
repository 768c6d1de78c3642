//! reqwest-backed transport for a task API reachable over HTTP

use reqwest::{Client, Method as HttpMethod};
use tracing::debug;

use taskdeck_core::transport::{ApiRequest, ApiResponse, Method, Transport, TransportFuture};
use taskdeck_core::{Error, Result};

pub struct HttpTransport {
    client: Client,
    base_url: String,
}

fn http_method(method: Method) -> HttpMethod {
    match method {
        Method::Get => HttpMethod::GET,
        Method::Post => HttpMethod::POST,
        Method::Put => HttpMethod::PUT,
        Method::Delete => HttpMethod::DELETE,
    }
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| Error::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!("Sending {} {}", request.method, url);

        let mut builder = self.client.request(http_method(request.method), &url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let res = builder
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Failed to connect to API: {}", e)))?;

        let status = res.status().as_u16();
        let bytes = res
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read response: {}", e)))?;

        Ok(ApiResponse::new(status, serde_json::from_slice(&bytes).ok()))
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> TransportFuture<'_> {
        Box::pin(self.dispatch(request))
    }
}
