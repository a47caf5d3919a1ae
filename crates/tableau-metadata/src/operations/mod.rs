//! Typed connection queries, one module per root entity.

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

use crate::gen::connection::Connection;
use crate::gen::schema::{self, SchemaError};
use crate::querybuilder::{query, GraphQLField, Selection};

pub mod common;
pub mod custom_sql_tables;
pub mod database_tables;
pub mod embedded_datasources;
pub mod fields;
pub mod published_datasources;
pub mod sheets;
pub mod workbooks;

pub use custom_sql_tables::GetCustomSqlTables;
pub use database_tables::GetDatabaseTables;
pub use embedded_datasources::GetEmbeddedDatasources;
pub use fields::GetFields;
pub use published_datasources::GetPublishedDatasources;
pub use sheets::GetSheets;
pub use workbooks::GetWorkbooks;

/// A query over one `*Connection` root field and its plain list twin.
pub trait ConnectionQuery: Send + Sync + 'static {
    const OPERATION_NAME: &'static str;
    /// e.g. `workbooksConnection`
    const CONNECTION_FIELD: &'static str;
    /// e.g. `workbooks`
    const LIST_FIELD: &'static str;
    /// Schema type of each node, e.g. `Workbook`.
    const NODE_TYPE: &'static str;

    type Filter: Serialize + Clone + Debug + Send + Sync + 'static;
    type SortOrder: Serialize + Clone + Debug + Send + Sync + 'static;
    type Node: DeserializeOwned + Send + 'static;

    fn node_fields() -> Vec<GraphQLField>;

    /// One page of the connection. `first` and `after` travel as variables,
    /// `filter` and `orderBy` are inlined.
    fn connection_selection(args: &ConnectionArgs<Self::Filter, Self::SortOrder>) -> Selection {
        let mut sel = query()
            .operation(Self::OPERATION_NAME)
            .variable("first", "Int", args.first)
            .variable("after", "String", args.after.as_deref())
            .select(Self::CONNECTION_FIELD)
            .arg_var("first", "first")
            .arg_var("after", "after");

        if let Some(filter) = &args.filter {
            sel = sel.arg("filter", filter);
        }
        if let Some(order_by) = &args.order_by {
            sel = sel.arg("orderBy", order_by);
        }

        sel.fields(Connection::<Self::Node>::selection(Self::node_fields()))
    }

    fn list_selection(filter: Option<&Self::Filter>) -> Selection {
        let mut sel = query()
            .operation(Self::OPERATION_NAME)
            .select(Self::LIST_FIELD);

        if let Some(filter) = filter {
            sel = sel.arg("filter", filter);
        }

        sel.fields(Self::node_fields())
    }

    /// Checks both root fields against the schema mirror, including that
    /// they yield `NODE_TYPE`.
    fn validate() -> Result<(), SchemaError> {
        for field in [Self::CONNECTION_FIELD, Self::LIST_FIELD] {
            let found = schema::node_type(field)?;
            if found != Self::NODE_TYPE {
                return Err(SchemaError::NodeTypeMismatch {
                    field: field.to_string(),
                    expected: Self::NODE_TYPE.to_string(),
                    found: found.to_string(),
                });
            }
        }

        let root = GraphQLField::new(Self::CONNECTION_FIELD)
            .fields(Connection::<Self::Node>::selection(Self::node_fields()));
        let list = GraphQLField::new(Self::LIST_FIELD).fields(Self::node_fields());

        schema::validate("Query", &[root, list])
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionArgs<F, O> {
    pub first: Option<i64>,
    pub after: Option<String>,
    pub filter: Option<F>,
    pub order_by: Option<O>,
}

impl<F, O> Default for ConnectionArgs<F, O> {
    fn default() -> Self {
        Self {
            first: None,
            after: None,
            filter: None,
            order_by: None,
        }
    }
}

impl<F, O> ConnectionArgs<F, O> {
    pub fn first(mut self, first: i64) -> Self {
        self.first = Some(first);
        self
    }

    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn filter(mut self, filter: F) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn order_by(mut self, order_by: O) -> Self {
        self.order_by = Some(order_by);
        self
    }
}

/// Shorthand for the arguments of `Q`.
pub type ArgsOf<Q> =
    ConnectionArgs<<Q as ConnectionQuery>::Filter, <Q as ConnectionQuery>::SortOrder>;
