use clap::{Arg, ArgAction, ArgMatches};
use tableau_metadata::connect_from_env;

use crate::entity::{Entity, QueryOptions};

pub struct QueryCommand;

impl QueryCommand {
    pub fn new_cmd() -> clap::Command {
        clap::Command::new("query")
            .about("Run a query against the server in TABLEAU_SERVER_URL and print the result as JSON")
            .args(QueryOptions::args())
            .arg(
                Arg::new("all")
                    .long("all")
                    .action(ArgAction::SetTrue)
                    .conflicts_with_all(["after", "list"])
                    .help("Follow cursors and print every node"),
            )
    }

    pub async fn exec(arg_matches: &ArgMatches) -> eyre::Result<()> {
        let entity = *arg_matches
            .get_one::<Entity>("entity")
            .ok_or_else(|| eyre::eyre!("entity is required"))?;
        let opts = QueryOptions::from_matches(arg_matches);
        let all = arg_matches.get_flag("all");

        connect_from_env(move |conn| async move {
            tracing::debug!(?entity, all, "running query");

            let value = entity.fetch(&conn, &opts, all).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);

            Ok(())
        })
        .await?;

        Ok(())
    }
}
