use thiserror::Error;

use crate::core::auth::AuthError;
use crate::core::config::ConfigError;
use crate::core::graphql_client::GraphQLError;

#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("failed to load tableau configuration")]
    Config(#[source] ConfigError),
    #[error("failed to sign in to tableau server")]
    Auth(#[source] AuthError),
    #[error("failed to set up metadata api transport")]
    Transport(#[source] GraphQLError),
    #[error("metadata session failed")]
    Session(#[source] eyre::Error),
    #[error("failed to sign out of tableau server")]
    SignOut(#[source] AuthError),
}

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("failed to build metadata query")]
    Build(#[source] eyre::Error),
    #[error("failed to render input value")]
    Serialize(#[source] eyre::Error),
    #[error("failed to query tableau metadata api: {0}")]
    Query(#[source] GraphQLError),
    #[error("failed to unpack response")]
    Unpack(#[source] UnpackError),
    #[error("pagination stalled: {0}")]
    Pagination(String),
}

#[derive(Error, Debug)]
pub enum UnpackError {
    #[error("Too many nested objects inside graphql response")]
    TooManyNestedObjects,
    #[error("field {0} is missing from graphql response")]
    MissingField(String),
    #[error("failed to deserialize response")]
    Deserialize(#[source] serde_json::Error),
}
