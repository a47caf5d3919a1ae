use crate::cli_document::DocumentCommand;
use crate::cli_query::QueryCommand;
use crate::cli_types::TypesCommand;

pub struct Cli {
    cmd: clap::Command,
}

impl Cli {
    pub fn new() -> eyre::Result<Self> {
        Ok(Self {
            cmd: clap::Command::new("tableau-metadata-cli")
                .about("Query the Tableau Metadata API")
                .subcommand_required(true)
                .subcommand(QueryCommand::new_cmd())
                .subcommand(DocumentCommand::new_cmd())
                .subcommand(TypesCommand::new_cmd()),
        })
    }

    pub async fn execute(self, args: &[&str]) -> eyre::Result<()> {
        let matches = self.cmd.get_matches_from(args);

        match matches.subcommand() {
            Some(("query", args)) => QueryCommand::exec(args).await?,
            Some(("document", args)) => DocumentCommand::exec(args)?,
            Some(("types", args)) => TypesCommand::exec(args)?,
            _ => eyre::bail!("command missing"),
        }

        Ok(())
    }
}
