use serde::{Deserialize, Serialize};

use crate::gen::enums::RemoteType;
use crate::gen::fields::{ColumnFields, DatabaseTableFields, TableFields};
use crate::gen::inputs::{DatabaseTableFilter, DatabaseTableSortOrder};
use crate::operations::ConnectionQuery;
use crate::querybuilder::GraphQLField;

pub struct GetDatabaseTables;

impl ConnectionQuery for GetDatabaseTables {
    const OPERATION_NAME: &'static str = "GetDatabaseTables";
    const CONNECTION_FIELD: &'static str = "databaseTablesConnection";
    const LIST_FIELD: &'static str = "databaseTables";
    const NODE_TYPE: &'static str = "DatabaseTable";

    type Filter = DatabaseTableFilter;
    type SortOrder = DatabaseTableSortOrder;
    type Node = DatabaseTable;

    fn node_fields() -> Vec<GraphQLField> {
        vec![
            TableFields::id(),
            DatabaseTableFields::is_embedded(),
            TableFields::columns([ColumnFields::remote_type(), ColumnFields::name()]),
        ]
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseTable {
    pub id: String,
    pub is_embedded: Option<bool>,
    pub columns: Vec<ColumnType>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnType {
    pub remote_type: RemoteType,
    pub name: Option<String>,
}
