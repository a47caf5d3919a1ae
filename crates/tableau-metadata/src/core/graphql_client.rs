use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::connect_params::ConnectParams;
use crate::core::gql_client::{ClientConfig, GQLClient};

pub const AUTH_HEADER: &str = "X-Tableau-Auth";

#[async_trait]
pub trait GraphQLClient {
    async fn query(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<Option<serde_json::Value>, GraphQLError>;
}

pub type DynGraphQLClient = Arc<dyn GraphQLClient + Send + Sync>;

#[derive(Debug)]
pub struct DefaultGraphQLClient {
    client: GQLClient,
}

impl DefaultGraphQLClient {
    pub fn new(conn: &ConnectParams) -> Result<Self, GraphQLError> {
        let mut headers = HashMap::new();
        headers.insert(AUTH_HEADER.to_string(), conn.token.clone());
        headers.insert("Accept".to_string(), "application/json".to_string());

        Self::with_config(ClientConfig {
            endpoint: conn.url(),
            timeout: Some(conn.timeout_secs()),
            headers: Some(headers),
            proxy: None,
        })
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, GraphQLError> {
        let client = GQLClient::new_with_config(config).map_err(map_graphql_error)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl GraphQLClient for DefaultGraphQLClient {
    async fn query(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<Option<serde_json::Value>, GraphQLError> {
        self.client
            .query_with_vars(query, &variables)
            .await
            .map_err(map_graphql_error)
    }
}

/// Failures carrying server `errors` entries are domain errors, the rest are
/// transport errors.
fn map_graphql_error(gql_error: crate::core::gql_client::GraphQLError) -> GraphQLError {
    let message = gql_error.message().to_string();
    if gql_error.errors().is_empty() {
        return GraphQLError::HttpError(message);
    }

    GraphQLError::DomainError {
        message,
        fields: GraphqlErrorMessages(gql_error.errors().iter().map(|e| e.message.clone()).collect()),
    }
}

#[derive(Error, Debug)]
pub enum GraphQLError {
    #[error("http error: {0}")]
    HttpError(String),
    #[error("domain error:\n{message}\n{fields}")]
    DomainError {
        message: String,
        fields: GraphqlErrorMessages,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphqlErrorMessages(pub Vec<String>);

impl std::fmt::Display for GraphqlErrorMessages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for error in self.0.iter() {
            f.write_fmt(format_args!("{error}\n"))?;
        }

        Ok(())
    }
}
