//! HTTP client for integration testing.
//!
//! Sends requests straight into the router with `tower::ServiceExt::oneshot`;
//! no socket is opened.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "playday-test-boundary";

/// Response status plus the decoded JSON body (`Null` when empty).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// Gets a value at the given dotted path; numeric segments index arrays.
    ///
    /// # Example
    /// ```ignore
    /// let title = response.get("ebazaar.title");
    /// ```
    pub fn get(&self, path: &str) -> Value {
        let mut current = &self.body;
        for key in path.split('.') {
            current = match key.parse::<usize>() {
                Ok(index) => &current[index],
                Err(_) => &current[key],
            };
        }
        current.clone()
    }
}

pub struct HttpClient {
    app: Router,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(app: Router) -> Self {
        Self { app, token: None }
    }

    /// Send the bearer token with every request.
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn post_empty(&self, uri: &str) -> TestResponse {
        self.send(Method::POST, uri, None).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    /// POST a raw (possibly malformed) JSON body.
    pub async fn post_raw(&self, uri: &str, raw: &str) -> TestResponse {
        let request = self
            .builder(Method::POST, uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw.to_string()))
            .expect("Failed to build request");
        self.dispatch(request).await
    }

    /// POST a multipart form with a single `file` field.
    pub async fn upload(
        &self,
        uri: &str,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> TestResponse {
        self.upload_field(uri, "file", file_name, content_type, bytes)
            .await
    }

    /// POST a multipart form with one field named `field`.
    pub async fn upload_field(
        &self,
        uri: &str,
        field: &str,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let request = self
            .builder(Method::POST, uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");
        self.dispatch(request).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = self.builder(method, uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");
        self.dispatch(request).await
    }

    fn builder(&self, method: Method, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.token {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };
        TestResponse { status, body }
    }
}
