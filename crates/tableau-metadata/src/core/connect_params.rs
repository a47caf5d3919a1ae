use serde::Deserialize;

pub const METADATA_PATH: &str = "/api/metadata/graphql";

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ConnectParams {
    pub server_url: String,
    pub token: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    30 * 1000
}

impl ConnectParams {
    pub fn new(server_url: &str, token: &str) -> Self {
        Self {
            server_url: server_url.to_string(),
            token: token.to_string(),
            timeout_ms: default_timeout_ms(),
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.server_url.trim_end_matches('/'), METADATA_PATH)
    }

    /// The transport takes whole seconds; anything below one rounds up.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_ms.div_ceil(1000).max(1)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::ConnectParams;

    #[test]
    fn test_url() {
        let params = ConnectParams::new("https://tableau.example.com", "token");
        assert_eq!(params.url(), "https://tableau.example.com/api/metadata/graphql");
    }

    #[test]
    fn test_url_trailing_slash() {
        let params = ConnectParams::new("https://tableau.example.com/", "token");
        assert_eq!(params.url(), "https://tableau.example.com/api/metadata/graphql");
    }

    #[test]
    fn test_timeout_secs() {
        let params = ConnectParams::new("http://localhost", "t");
        assert_eq!(params.timeout_secs(), 30);
        assert_eq!(params.clone().with_timeout_ms(1500).timeout_secs(), 2);
        assert_eq!(params.with_timeout_ms(0).timeout_secs(), 1);
    }
}
