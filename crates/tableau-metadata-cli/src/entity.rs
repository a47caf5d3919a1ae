//! Root entities reachable from the command line, and the generic plumbing
//! that turns flags into typed connection queries.

use clap::builder::PossibleValue;
use clap::{Arg, ArgAction, ArgMatches, ValueEnum};
use eyre::WrapErr;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tableau_metadata::operations::{
    GetCustomSqlTables, GetDatabaseTables, GetEmbeddedDatasources, GetFields,
    GetPublishedDatasources, GetSheets, GetWorkbooks,
};
use tableau_metadata::{ArgsOf, ConnectionQuery, Selection, TableauConn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    Workbooks,
    Sheets,
    PublishedDatasources,
    EmbeddedDatasources,
    Fields,
    CustomSqlTables,
    DatabaseTables,
}

impl ValueEnum for Entity {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Entity::Workbooks,
            Entity::Sheets,
            Entity::PublishedDatasources,
            Entity::EmbeddedDatasources,
            Entity::Fields,
            Entity::CustomSqlTables,
            Entity::DatabaseTables,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(match self {
            Entity::Workbooks => "workbooks",
            Entity::Sheets => "sheets",
            Entity::PublishedDatasources => "published-datasources",
            Entity::EmbeddedDatasources => "embedded-datasources",
            Entity::Fields => "fields",
            Entity::CustomSqlTables => "custom-sql-tables",
            Entity::DatabaseTables => "database-tables",
        }))
    }
}

/// Flags shared by `query` and `document`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOptions {
    pub first: Option<i64>,
    pub after: Option<String>,
    pub filter: Option<String>,
    pub order_by: Option<String>,
    pub list: bool,
}

impl QueryOptions {
    pub fn args() -> Vec<Arg> {
        vec![
            Arg::new("entity")
                .required(true)
                .value_parser(clap::value_parser!(Entity)),
            Arg::new("first")
                .long("first")
                .value_parser(clap::value_parser!(i64))
                .help("Page size"),
            Arg::new("after")
                .long("after")
                .help("Cursor of the previous page"),
            Arg::new("filter")
                .long("filter")
                .help("Filter as JSON, e.g. '{\"projectName\": \"Finance\"}'"),
            Arg::new("order-by")
                .long("order-by")
                .help("Sort order as JSON, e.g. '{\"field\": \"NAME\", \"direction\": \"DESC\"}'"),
            Arg::new("list")
                .long("list")
                .action(ArgAction::SetTrue)
                .help("Use the plain list field instead of the connection"),
        ]
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            first: matches.get_one::<i64>("first").copied(),
            after: matches.get_one::<String>("after").cloned(),
            filter: matches.get_one::<String>("filter").cloned(),
            order_by: matches.get_one::<String>("order-by").cloned(),
            list: matches.get_flag("list"),
        }
    }
}

impl Entity {
    pub fn selection(self, opts: &QueryOptions) -> eyre::Result<Selection> {
        match self {
            Entity::Workbooks => selection::<GetWorkbooks>(opts),
            Entity::Sheets => selection::<GetSheets>(opts),
            Entity::PublishedDatasources => selection::<GetPublishedDatasources>(opts),
            Entity::EmbeddedDatasources => selection::<GetEmbeddedDatasources>(opts),
            Entity::Fields => selection::<GetFields>(opts),
            Entity::CustomSqlTables => selection::<GetCustomSqlTables>(opts),
            Entity::DatabaseTables => selection::<GetDatabaseTables>(opts),
        }
    }

    pub async fn fetch(
        self,
        conn: &TableauConn,
        opts: &QueryOptions,
        all: bool,
    ) -> eyre::Result<serde_json::Value> {
        match self {
            Entity::Workbooks => fetch::<GetWorkbooks>(conn, opts, all).await,
            Entity::Sheets => fetch::<GetSheets>(conn, opts, all).await,
            Entity::PublishedDatasources => fetch::<GetPublishedDatasources>(conn, opts, all).await,
            Entity::EmbeddedDatasources => fetch::<GetEmbeddedDatasources>(conn, opts, all).await,
            Entity::Fields => fetch::<GetFields>(conn, opts, all).await,
            Entity::CustomSqlTables => fetch::<GetCustomSqlTables>(conn, opts, all).await,
            Entity::DatabaseTables => fetch::<GetDatabaseTables>(conn, opts, all).await,
        }
    }
}

fn parse_json<T: DeserializeOwned>(value: Option<&str>, flag: &str) -> eyre::Result<Option<T>> {
    value
        .map(|v| serde_json::from_str(v).wrap_err_with(|| format!("invalid {flag}: {v}")))
        .transpose()
}

fn connection_args<Q>(opts: &QueryOptions) -> eyre::Result<ArgsOf<Q>>
where
    Q: ConnectionQuery,
    Q::Filter: DeserializeOwned,
    Q::SortOrder: DeserializeOwned,
{
    Ok(ArgsOf::<Q> {
        first: opts.first,
        after: opts.after.clone(),
        filter: parse_json(opts.filter.as_deref(), "--filter")?,
        order_by: parse_json(opts.order_by.as_deref(), "--order-by")?,
    })
}

fn selection<Q>(opts: &QueryOptions) -> eyre::Result<Selection>
where
    Q: ConnectionQuery,
    Q::Filter: DeserializeOwned,
    Q::SortOrder: DeserializeOwned,
{
    Q::validate()?;

    let args = connection_args::<Q>(opts)?;
    if opts.list {
        return Ok(Q::list_selection(args.filter.as_ref()));
    }

    Ok(Q::connection_selection(&args))
}

async fn fetch<Q>(conn: &TableauConn, opts: &QueryOptions, all: bool) -> eyre::Result<serde_json::Value>
where
    Q: ConnectionQuery,
    Q::Filter: DeserializeOwned,
    Q::SortOrder: DeserializeOwned,
    Q::Node: Serialize,
{
    let mut args = connection_args::<Q>(opts)?;

    let value = if opts.list {
        serde_json::to_value(conn.list::<Q>(args.filter).await?)?
    } else if all {
        serde_json::to_value(conn.fetch_all::<Q>(args.filter, args.order_by).await?)?
    } else {
        args.first = args.first.or(Some(conn.page_size));
        serde_json::to_value(conn.connection::<Q>(args).await?)?
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Entity, QueryOptions};

    #[test]
    fn test_connection_document() {
        let opts = QueryOptions {
            first: Some(10),
            filter: Some(r#"{"isEmbedded": true}"#.into()),
            ..Default::default()
        };

        let doc = Entity::DatabaseTables.selection(&opts).unwrap().build().unwrap();

        assert_eq!(
            doc,
            "query GetDatabaseTables($first: Int, $after: String){databaseTablesConnection(first:$first, after:$after, filter:{isEmbedded:true}){nodes{id isEmbedded columns{remoteType name}} pageInfo{hasNextPage endCursor} totalCount}}"
        );
    }

    #[test]
    fn test_list_document() {
        let opts = QueryOptions {
            list: true,
            ..Default::default()
        };

        let doc = Entity::DatabaseTables.selection(&opts).unwrap().build().unwrap();

        assert_eq!(
            doc,
            "query GetDatabaseTables{databaseTables{id isEmbedded columns{remoteType name}}}"
        );
    }

    #[test]
    fn test_unknown_filter_key() {
        let opts = QueryOptions {
            filter: Some(r#"{"owner": "jdoe"}"#.into()),
            ..Default::default()
        };

        let err = Entity::Workbooks.selection(&opts).unwrap_err();

        assert!(err.to_string().contains("invalid --filter"), "{err}");
    }

    #[test]
    fn test_every_entity_validates() {
        for entity in <Entity as clap::ValueEnum>::value_variants() {
            entity.selection(&QueryOptions::default()).unwrap();
        }
    }
}
