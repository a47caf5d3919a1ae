//! HTTP transport for GraphQL documents.
//!
//! Redirects are resolved here instead of by reqwest, which would turn a
//! `POST` into a bodiless `GET` on 301/302. Credential headers are only sent
//! to the origin they were configured for.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, COOKIE, LOCATION, PROXY_AUTHORIZATION,
};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_REDIRECTS: usize = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 5;
const SESSION_HEADER: &str = "x-tableau-auth";

/// One entry of a response's `errors` list.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GraphQLErrorMessage {
    pub message: String,
    pub locations: Option<Vec<GraphQLErrorLocation>>,
    pub extensions: Option<HashMap<String, serde_json::Value>>,
    pub path: Option<Vec<GraphQLErrorPathParam>>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GraphQLErrorLocation {
    pub line: u32,
    pub column: u32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum GraphQLErrorPathParam {
    Key(String),
    Index(u32),
}

#[derive(Error, Debug, Clone)]
#[error("{message}{}", list_messages(.errors))]
pub struct GraphQLError {
    message: String,
    errors: Vec<GraphQLErrorMessage>,
}

fn list_messages(errors: &[GraphQLErrorMessage]) -> String {
    errors.iter().map(|e| format!("\n  {}", e.message)).collect()
}

impl GraphQLError {
    pub fn with_text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_message_and_json(message: impl Into<String>, errors: Vec<GraphQLErrorMessage>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }

    pub fn with_json(errors: Vec<GraphQLErrorMessage>) -> Self {
        Self::with_message_and_json("graphql request returned errors", errors)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The server's `errors` entries; empty for transport failures.
    pub fn errors(&self) -> &[GraphQLErrorMessage] {
        &self.errors
    }
}

impl From<reqwest::Error> for GraphQLError {
    fn from(error: reqwest::Error) -> Self {
        Self::with_text(error.to_string())
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ClientConfig {
    pub endpoint: String,
    /// Whole seconds; five when unset.
    pub timeout: Option<u64>,
    /// Sent with every request. Redirects to another origin drop the
    /// credential headers among them.
    pub headers: Option<HashMap<String, String>>,
    pub proxy: Option<GQLProxy>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ProxyType {
    Http,
    Https,
    All,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProxyAuth {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GQLProxy {
    pub url: String,
    pub kind: ProxyType,
    pub auth: Option<ProxyAuth>,
}

impl GQLProxy {
    fn to_reqwest(&self) -> Result<reqwest::Proxy, GraphQLError> {
        let proxy = match self.kind {
            ProxyType::Http => reqwest::Proxy::http(&self.url),
            ProxyType::Https => reqwest::Proxy::https(&self.url),
            ProxyType::All => reqwest::Proxy::all(&self.url),
        }
        .map_err(|e| GraphQLError::with_text(format!("invalid proxy {}: {e}", self.url)))?;

        Ok(match &self.auth {
            Some(auth) => proxy.basic_auth(&auth.username, &auth.password),
            None => proxy,
        })
    }
}

#[derive(Serialize)]
struct RequestBody<'a> {
    query: &'a str,
    variables: &'a serde_json::Value,
}

#[derive(Deserialize)]
struct ResponseBody {
    data: Option<serde_json::Value>,
    errors: Option<Vec<GraphQLErrorMessage>>,
}

#[derive(Clone, Debug)]
pub struct GQLClient {
    endpoint: String,
    headers: HeaderMap,
    http: Client,
}

impl GQLClient {
    pub fn new_with_config(config: ClientConfig) -> Result<Self, GraphQLError> {
        let mut builder = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(config.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)));
        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(proxy.to_reqwest()?);
        }
        let http = builder
            .build()
            .map_err(|e| GraphQLError::with_text(format!("failed to create http client: {e}")))?;

        let mut headers = HeaderMap::new();
        for (name, value) in config.headers.unwrap_or_default() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| GraphQLError::with_text(format!("invalid header name {name}: {e}")))?;
            let value = HeaderValue::from_str(&value)
                .map_err(|e| GraphQLError::with_text(format!("invalid value for header {name}: {e}")))?;
            headers.insert(name, value);
        }

        Ok(Self {
            endpoint: config.endpoint,
            headers,
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `query` with `variables` and returns the response's `data`.
    pub async fn query_with_vars(
        &self,
        query: &str,
        variables: &serde_json::Value,
    ) -> Result<Option<serde_json::Value>, GraphQLError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| GraphQLError::with_text(format!("invalid endpoint {}: {e}", self.endpoint)))?;
        let body = RequestBody { query, variables };
        let mut headers = self.headers.clone();

        for _ in 0..=MAX_REDIRECTS {
            let resp = self
                .http
                .post(url.clone())
                .headers(headers.clone())
                .json(&body)
                .send()
                .await?;

            let status = resp.status();
            if status.is_redirection() {
                if let Some(location) = resp.headers().get(LOCATION) {
                    let next = follow(&url, location)?;
                    if next.origin() != url.origin() {
                        tracing::debug!(
                            from = url.as_str(),
                            to = next.as_str(),
                            "redirected to another origin, dropping credentials"
                        );
                        strip_credentials(&mut headers);
                    }
                    url = next;
                    tracing::debug!(endpoint = url.as_str(), "following redirect");
                    continue;
                }
            }

            let text = resp.text().await?;

            return decode(status, &text);
        }

        Err(GraphQLError::with_text(format!(
            "too many redirects, last location: {url}"
        )))
    }
}

fn follow(current: &Url, location: &HeaderValue) -> Result<Url, GraphQLError> {
    let location = location
        .to_str()
        .map_err(|e| GraphQLError::with_text(format!("unreadable Location header: {e}")))?;

    current
        .join(location)
        .map_err(|e| GraphQLError::with_text(format!("invalid redirect location {location}: {e}")))
}

fn strip_credentials(headers: &mut HeaderMap) {
    for name in [AUTHORIZATION, PROXY_AUTHORIZATION, COOKIE] {
        headers.remove(name);
    }
    headers.remove(SESSION_HEADER);
}

fn decode(status: StatusCode, text: &str) -> Result<Option<serde_json::Value>, GraphQLError> {
    let body: ResponseBody = serde_json::from_str(text).map_err(|e| {
        GraphQLError::with_text(format!(
            "Failed to parse response [{}]: {e}. The response body is: {text}",
            status.as_u16()
        ))
    })?;
    let errors = body.errors.unwrap_or_default();

    if !status.is_success() {
        return Err(GraphQLError::with_message_and_json(
            format!("The response is [{}]", status.as_u16()),
            errors,
        ));
    }
    if !errors.is_empty() {
        return Err(GraphQLError::with_json(errors));
    }
    if body.data.is_none() {
        tracing::warn!(response = text, "graphql response carried no data");
    }

    Ok(body.data)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
    use reqwest::{StatusCode, Url};
    use serde_json::json;
    use tracing_test::traced_test;

    use super::{decode, follow, strip_credentials, ClientConfig, GQLClient, GQLProxy, ProxyType};

    fn follow_from(current: &str, location: &'static str) -> String {
        let current = Url::parse(current).unwrap();
        follow(&current, &HeaderValue::from_static(location))
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_follow_absolute() {
        assert_eq!(
            follow_from("http://a.example.com/api/metadata/graphql", "https://b.example.com/x"),
            "https://b.example.com/x"
        );
    }

    #[test]
    fn test_follow_host_relative() {
        assert_eq!(
            follow_from("https://tableau.example.com/old/graphql", "/api/metadata/graphql"),
            "https://tableau.example.com/api/metadata/graphql"
        );
    }

    #[test]
    fn test_follow_keeps_port() {
        assert_eq!(
            follow_from("http://127.0.0.1:8080/old", "/new"),
            "http://127.0.0.1:8080/new"
        );
    }

    #[test]
    fn test_strip_credentials_keeps_other_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-tableau-auth", HeaderValue::from_static("session-token"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        strip_credentials(&mut headers);

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }

    fn with_proxy(url: &str, kind: ProxyType) -> ClientConfig {
        ClientConfig {
            endpoint: "http://tableau.example.com/api/metadata/graphql".into(),
            timeout: None,
            headers: None,
            proxy: Some(GQLProxy {
                url: url.into(),
                kind,
                auth: None,
            }),
        }
    }

    #[test]
    fn test_accepts_every_proxy_kind() {
        for kind in [ProxyType::Http, ProxyType::Https, ProxyType::All] {
            let client = GQLClient::new_with_config(with_proxy("http://proxy.internal:3128", kind));
            assert!(client.is_ok(), "{kind:?}: {:?}", client.err());
        }
    }

    #[test]
    fn test_rejects_invalid_proxy_url() {
        let err = GQLClient::new_with_config(with_proxy("http://[::1", ProxyType::All)).unwrap_err();

        assert!(err.message().starts_with("invalid proxy"), "{err}");
    }

    #[test]
    fn test_decode_data() {
        let data = decode(StatusCode::OK, r#"{"data": {"workbooks": []}}"#).unwrap();
        assert_eq!(data, Some(json!({"workbooks": []})));
    }

    #[test]
    fn test_decode_errors_on_success_status() {
        let err = decode(
            StatusCode::OK,
            r#"{"data": null, "errors": [{"message": "boom", "path": ["workbooks", 0]}]}"#,
        )
        .unwrap_err();

        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.to_string(), "graphql request returned errors\n  boom");
    }

    #[test]
    #[traced_test]
    fn test_decode_null_data_warns() {
        let data = decode(StatusCode::OK, r#"{"data": null}"#).unwrap();

        assert_eq!(data, None);
        assert!(logs_contain("graphql response carried no data"));
    }

    #[test]
    fn test_decode_non_json() {
        let err = decode(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").unwrap_err();

        assert!(err.message().contains("[502]"));
        assert!(err.message().contains("<html>bad gateway</html>"));
    }
}
