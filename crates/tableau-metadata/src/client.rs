use std::sync::Arc;

use crate::core::auth::{self, Credentials};
use crate::core::config::{AuthMethod, Config};
use crate::core::connect_params::ConnectParams;
use crate::core::graphql_client::DefaultGraphQLClient;
use crate::errors::ConnectError;
use crate::gen::query::Query;

pub type TableauConn = Query;

/// Signs in if needed, hands the root query to `session`, and signs out again
/// when the session was opened here with a personal access token.
///
/// Sign-out runs even when `session` fails; its error is reported first.
pub async fn connect<F, Fut>(cfg: Config, session: F) -> Result<(), ConnectError>
where
    F: FnOnce(TableauConn) -> Fut,
    Fut: futures::Future<Output = eyre::Result<()>>,
{
    let (conn, signed_in) = open(&cfg).await?;

    let res = session(conn).await.map_err(ConnectError::Session);

    if let Some(creds) = signed_in {
        let closed = auth::sign_out(&cfg, &creds).await.map_err(ConnectError::SignOut);
        if let Err(e) = &closed {
            tracing::warn!(error = %e, "failed to close tableau session");
        }
        res?;
        return closed;
    }

    res
}

/// `connect` with configuration read from the environment.
pub async fn connect_from_env<F, Fut>(session: F) -> Result<(), ConnectError>
where
    F: FnOnce(TableauConn) -> Fut,
    Fut: futures::Future<Output = eyre::Result<()>>,
{
    let cfg = Config::from_env().map_err(ConnectError::Config)?;

    connect(cfg, session).await
}

/// Builds the root query. The credentials are returned only when they came
/// from a sign-in, since a configured session token is not ours to close.
async fn open(cfg: &Config) -> Result<(TableauConn, Option<Credentials>), ConnectError> {
    let creds = auth::resolve(cfg).await.map_err(ConnectError::Auth)?;

    let params = ConnectParams::new(&cfg.server_url, &creds.token).with_timeout_ms(cfg.timeout_ms);
    tracing::debug!(endpoint = params.url().as_str(), "connecting to metadata api");

    let client = DefaultGraphQLClient::new(&params).map_err(ConnectError::Transport)?;
    let conn = Query::with_client(Arc::new(client), cfg.page_size);

    let signed_in = match cfg.auth {
        AuthMethod::PersonalAccessToken { .. } => Some(creds),
        AuthMethod::SessionToken(_) => None,
    };

    Ok((conn, signed_in))
}
