use serde::{Deserialize, Serialize};

use crate::gen::enums::RemoteType;
use crate::gen::fields::{
    typename, ColumnFields, CustomSqlTableFields, DatasourceFields, EmbeddedDatasourceFields,
    FieldFields, PublishedDatasourceFields, TableFields,
};
use crate::gen::inputs::{CustomSqlTableFilter, CustomSqlTableSortOrder};
use crate::operations::common::{
    database_ref, upstream_tables, workbook_ref, DatabaseRef, DatasourceKind, UpstreamTable,
    WorkbookRef,
};
use crate::operations::ConnectionQuery;
use crate::querybuilder::GraphQLField;

pub struct GetCustomSqlTables;

impl ConnectionQuery for GetCustomSqlTables {
    const OPERATION_NAME: &'static str = "GetCustomSqlTables";
    const CONNECTION_FIELD: &'static str = "customSQLTablesConnection";
    const LIST_FIELD: &'static str = "customSQLTables";
    const NODE_TYPE: &'static str = "CustomSQLTable";

    type Filter = CustomSqlTableFilter;
    type SortOrder = CustomSqlTableSortOrder;
    type Node = CustomSqlTable;

    fn node_fields() -> Vec<GraphQLField> {
        vec![
            TableFields::id(),
            TableFields::name(),
            CustomSqlTableFields::query(),
            TableFields::columns([
                ColumnFields::id(),
                ColumnFields::name(),
                ColumnFields::remote_type(),
                ColumnFields::description(),
                ColumnFields::referenced_by_fields([referencing_datasource()]),
            ]),
            upstream_tables("tables", true),
            CustomSqlTableFields::connection_type(),
            database_ref(true),
        ]
    }
}

/// `datasource{..}` of a column field, with the project of a published data
/// source or the workbook of an embedded one.
fn referencing_datasource() -> GraphQLField {
    FieldFields::datasource([
        typename(),
        DatasourceFields::id(),
        DatasourceFields::name(),
        upstream_tables("upstreamTables", false),
    ])
    .on(
        PublishedDatasourceFields::TYPE_NAME,
        [
            PublishedDatasourceFields::project_name(),
            PublishedDatasourceFields::luid(),
        ],
    )
    .on(EmbeddedDatasourceFields::TYPE_NAME, [workbook_ref(false)])
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomSqlTable {
    pub id: String,
    pub name: Option<String>,
    pub query: Option<String>,
    pub columns: Vec<SqlColumn>,
    pub tables: Vec<UpstreamTable>,
    pub connection_type: Option<String>,
    pub database: Option<DatabaseRef>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SqlColumn {
    pub id: String,
    pub name: Option<String>,
    pub remote_type: RemoteType,
    pub description: Option<String>,
    pub referenced_by_fields: Option<Vec<Option<ColumnReference>>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ColumnReference {
    pub datasource: Option<ReferencingDatasource>,
}

/// `project_name` and `luid` are set for published data sources, `workbook`
/// for embedded ones.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReferencingDatasource {
    #[serde(rename = "__typename")]
    pub typename: DatasourceKind,
    pub id: String,
    pub name: Option<String>,
    pub upstream_tables: Vec<UpstreamTable>,
    pub project_name: Option<String>,
    pub luid: Option<String>,
    pub workbook: Option<WorkbookRef>,
}
