use thiserror::Error;

pub const DEFAULT_API_VERSION: &str = "3.19";
pub const DEFAULT_TIMEOUT_MS: u64 = 30 * 1000;
pub const DEFAULT_PAGE_SIZE: i64 = 100;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("no credentials: set TABLEAU_AUTH_TOKEN or TABLEAU_PAT_NAME and TABLEAU_PAT_SECRET")]
    MissingCredentials,
    #[error("{name} is not a valid number: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Clone, PartialEq)]
pub enum AuthMethod {
    PersonalAccessToken { name: String, secret: String },
    /// An `X-Tableau-Auth` token obtained elsewhere.
    SessionToken(String),
}

impl std::fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMethod::PersonalAccessToken { name, .. } => f
                .debug_struct("PersonalAccessToken")
                .field("name", name)
                .field("secret", &"<redacted>")
                .finish(),
            AuthMethod::SessionToken(_) => f.debug_tuple("SessionToken").field(&"<redacted>").finish(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub server_url: String,
    pub site_content_url: String,
    pub api_version: String,
    pub auth: AuthMethod,
    pub timeout_ms: u64,
    pub page_size: i64,
}

impl Config {
    pub fn new(
        server_url: impl Into<String>,
        auth: AuthMethod,
        site_content_url: Option<String>,
        api_version: Option<String>,
        timeout_ms: Option<u64>,
        page_size: Option<i64>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            site_content_url: site_content_url.unwrap_or_default(),
            api_version: api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            auth,
            timeout_ms: timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. `from_env` passes the process
    /// environment; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_url = get("TABLEAU_SERVER_URL").ok_or(ConfigError::Missing("TABLEAU_SERVER_URL"))?;

        let auth = match (
            get("TABLEAU_AUTH_TOKEN"),
            get("TABLEAU_PAT_NAME"),
            get("TABLEAU_PAT_SECRET"),
        ) {
            (Some(token), _, _) => AuthMethod::SessionToken(token),
            (None, Some(name), Some(secret)) => AuthMethod::PersonalAccessToken { name, secret },
            _ => return Err(ConfigError::MissingCredentials),
        };

        let timeout_ms = parse_number::<u64>("TABLEAU_TIMEOUT_MS", get("TABLEAU_TIMEOUT_MS"))?;
        let page_size = parse_number::<i64>("TABLEAU_PAGE_SIZE", get("TABLEAU_PAGE_SIZE"))?;

        Ok(Self::new(
            server_url,
            auth,
            get("TABLEAU_SITE"),
            get("TABLEAU_API_VERSION"),
            timeout_ms,
            page_size,
        ))
    }

    pub fn rest_url(&self, path: &str) -> String {
        format!(
            "{}/api/{}/{}",
            self.server_url.trim_end_matches('/'),
            self.api_version,
            path.trim_start_matches('/')
        )
    }
}

fn parse_number<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| {
            v.trim().parse::<T>().map_err(|_| ConfigError::InvalidNumber {
                name,
                value: v.clone(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::{AuthMethod, Config, ConfigError, DEFAULT_API_VERSION};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_lookup(lookup(&[
            ("TABLEAU_SERVER_URL", "https://tableau.example.com"),
            ("TABLEAU_AUTH_TOKEN", "abc"),
        ]))
        .unwrap();

        assert_eq!(cfg.api_version, DEFAULT_API_VERSION);
        assert_eq!(cfg.site_content_url, "");
        assert_eq!(cfg.timeout_ms, 30_000);
        assert_eq!(cfg.page_size, 100);
        assert_eq!(cfg.auth, AuthMethod::SessionToken("abc".into()));
    }

    #[test]
    fn test_personal_access_token() {
        let cfg = Config::from_lookup(lookup(&[
            ("TABLEAU_SERVER_URL", "https://tableau.example.com"),
            ("TABLEAU_SITE", "marketing"),
            ("TABLEAU_PAT_NAME", "ci"),
            ("TABLEAU_PAT_SECRET", "s3cr3t"),
            ("TABLEAU_PAGE_SIZE", "25"),
        ]))
        .unwrap();

        assert_eq!(
            cfg.auth,
            AuthMethod::PersonalAccessToken {
                name: "ci".into(),
                secret: "s3cr3t".into()
            }
        );
        assert_eq!(cfg.site_content_url, "marketing");
        assert_eq!(cfg.page_size, 25);
    }

    #[test]
    fn test_session_token_wins_over_pat() {
        let cfg = Config::from_lookup(lookup(&[
            ("TABLEAU_SERVER_URL", "https://tableau.example.com"),
            ("TABLEAU_AUTH_TOKEN", "abc"),
            ("TABLEAU_PAT_NAME", "ci"),
            ("TABLEAU_PAT_SECRET", "s3cr3t"),
        ]))
        .unwrap();

        assert_eq!(cfg.auth, AuthMethod::SessionToken("abc".into()));
    }

    #[test]
    fn test_missing_server() {
        let err = Config::from_lookup(lookup(&[("TABLEAU_AUTH_TOKEN", "abc")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("TABLEAU_SERVER_URL"));
    }

    #[test]
    fn test_missing_credentials() {
        let err = Config::from_lookup(lookup(&[
            ("TABLEAU_SERVER_URL", "https://tableau.example.com"),
            ("TABLEAU_PAT_NAME", "ci"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingCredentials);
    }

    #[test]
    fn test_invalid_number() {
        let err = Config::from_lookup(lookup(&[
            ("TABLEAU_SERVER_URL", "https://tableau.example.com"),
            ("TABLEAU_AUTH_TOKEN", "abc"),
            ("TABLEAU_TIMEOUT_MS", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name: "TABLEAU_TIMEOUT_MS",
                value: "soon".into()
            }
        );
    }

    #[test]
    fn test_rest_url() {
        let cfg = Config::new(
            "https://tableau.example.com/",
            AuthMethod::SessionToken("t".into()),
            None,
            Some("3.21".into()),
            None,
            None,
        );

        assert_eq!(
            cfg.rest_url("/auth/signin"),
            "https://tableau.example.com/api/3.21/auth/signin"
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let auth = AuthMethod::PersonalAccessToken {
            name: "ci".into(),
            secret: "s3cr3t".into(),
        };

        assert!(!format!("{auth:?}").contains("s3cr3t"));
    }
}
