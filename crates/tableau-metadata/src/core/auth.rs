//! Session sign-in through the Tableau REST API.
//!
//! The Metadata API accepts the same `X-Tableau-Auth` token as the REST API,
//! so a personal access token is exchanged for a session token once and the
//! token is reused for every GraphQL request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::{AuthMethod, Config};
use crate::core::graphql_client::AUTH_HEADER;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("sign-in request failed")]
    Request(#[source] reqwest::Error),
    #[error("tableau server rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("failed to parse sign-in response")]
    Parse(#[source] serde_json::Error),
}

#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub token: String,
    pub site_id: Option<String>,
    pub user_id: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("site_id", &self.site_id)
            .field("user_id", &self.user_id)
            .finish()
    }
}

#[derive(Serialize)]
struct SignInRequest<'a> {
    credentials: SignInCredentials<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInCredentials<'a> {
    personal_access_token_name: &'a str,
    personal_access_token_secret: &'a str,
    site: SiteRef<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SiteRef<'a> {
    content_url: &'a str,
}

#[derive(Deserialize)]
struct SignInResponse {
    credentials: SignInResponseCredentials,
}

#[derive(Deserialize)]
struct SignInResponseCredentials {
    token: String,
    site: Option<IdRef>,
    user: Option<IdRef>,
}

#[derive(Deserialize)]
struct IdRef {
    id: Option<String>,
}

fn http_client(cfg: &Config) -> Result<reqwest::Client, AuthError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(cfg.timeout_ms))
        .build()
        .map_err(AuthError::Request)
}

/// Resolves the session token for `cfg`, signing in when the config holds a
/// personal access token.
pub async fn resolve(cfg: &Config) -> Result<Credentials, AuthError> {
    match &cfg.auth {
        AuthMethod::SessionToken(token) => Ok(Credentials {
            token: token.clone(),
            site_id: None,
            user_id: None,
        }),
        AuthMethod::PersonalAccessToken { name, secret } => sign_in(cfg, name, secret).await,
    }
}

pub async fn sign_in(cfg: &Config, name: &str, secret: &str) -> Result<Credentials, AuthError> {
    let body = SignInRequest {
        credentials: SignInCredentials {
            personal_access_token_name: name,
            personal_access_token_secret: secret,
            site: SiteRef {
                content_url: &cfg.site_content_url,
            },
        },
    };

    let resp = http_client(cfg)?
        .post(cfg.rest_url("auth/signin"))
        .header("Accept", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(AuthError::Request)?;

    let status = resp.status();
    let text = resp.text().await.map_err(AuthError::Request)?;
    if !status.is_success() {
        return Err(AuthError::Rejected {
            status: status.as_u16(),
            body: text,
        });
    }

    let parsed: SignInResponse = serde_json::from_str(&text).map_err(AuthError::Parse)?;
    let creds = Credentials {
        token: parsed.credentials.token,
        site_id: parsed.credentials.site.and_then(|s| s.id),
        user_id: parsed.credentials.user.and_then(|u| u.id),
    };

    tracing::info!(
        site = cfg.site_content_url.as_str(),
        token_name = name,
        "signed in to tableau server"
    );

    Ok(creds)
}

pub async fn sign_out(cfg: &Config, creds: &Credentials) -> Result<(), AuthError> {
    let resp = http_client(cfg)?
        .post(cfg.rest_url("auth/signout"))
        .header(AUTH_HEADER, &creds.token)
        .send()
        .await
        .map_err(AuthError::Request)?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(AuthError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    tracing::info!(site = cfg.site_content_url.as_str(), "signed out of tableau server");

    Ok(())
}
