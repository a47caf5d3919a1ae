//! Field lineage: which fields and columns each field is derived from.

use serde::{Deserialize, Serialize};

use crate::gen::fields::{typename, ColumnFields, DatasourceFields, FieldFields, TableFields};
use crate::gen::inputs::{FieldFilter, FieldSortOrder};
use crate::operations::common::{DatasourceKind, FieldKind, TableKind};
use crate::operations::ConnectionQuery;
use crate::querybuilder::GraphQLField;

pub struct GetFields;

impl ConnectionQuery for GetFields {
    const OPERATION_NAME: &'static str = "GetFields";
    const CONNECTION_FIELD: &'static str = "fieldsConnection";
    const LIST_FIELD: &'static str = "fields";
    const NODE_TYPE: &'static str = "Field";

    type Filter = FieldFilter;
    type SortOrder = FieldSortOrder;
    type Node = FieldLineage;

    fn node_fields() -> Vec<GraphQLField> {
        vec![
            typename(),
            FieldFields::id(),
            FieldFields::upstream_fields([
                typename(),
                FieldFields::name(),
                FieldFields::datasource([typename(), DatasourceFields::id()]),
            ]),
            FieldFields::upstream_columns([
                ColumnFields::name(),
                ColumnFields::table([typename(), TableFields::id()]),
            ]),
        ]
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldLineage {
    #[serde(rename = "__typename")]
    pub typename: FieldKind,
    pub id: String,
    pub upstream_fields: Vec<Option<UpstreamField>>,
    pub upstream_columns: Vec<Option<UpstreamColumn>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UpstreamField {
    #[serde(rename = "__typename")]
    pub typename: FieldKind,
    pub name: Option<String>,
    pub datasource: Option<DatasourceId>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DatasourceId {
    #[serde(rename = "__typename")]
    pub typename: DatasourceKind,
    pub id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UpstreamColumn {
    pub name: Option<String>,
    pub table: Option<TableId>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TableId {
    #[serde(rename = "__typename")]
    pub typename: TableKind,
    pub id: String,
}
