use std::io::Write;

use clap::{Arg, ArgMatches};

use crate::entity::{Entity, QueryOptions};

pub struct DocumentCommand;

impl DocumentCommand {
    pub fn new_cmd() -> clap::Command {
        clap::Command::new("document")
            .about("Print the GraphQL document and variables a query would send")
            .args(QueryOptions::args())
            .arg(Arg::new("output").long("output"))
    }

    pub fn exec(arg_matches: &ArgMatches) -> eyre::Result<()> {
        let entity = *arg_matches
            .get_one::<Entity>("entity")
            .ok_or_else(|| eyre::eyre!("entity is required"))?;
        let opts = QueryOptions::from_matches(arg_matches);

        let selection = entity.selection(&opts)?;
        let document = selection.build()?;
        let variables = serde_json::to_string_pretty(&selection.variable_values()?)?;

        if let Some(output) = arg_matches.get_one::<String>("output") {
            let mut file = std::fs::File::create(output)?;
            file.write_all(document.as_bytes())?;
            eprintln!("{variables}");
        } else {
            println!("{document}");
            println!("{variables}");
        }

        Ok(())
    }
}
