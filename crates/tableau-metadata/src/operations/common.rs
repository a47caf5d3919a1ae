//! Response shapes shared by several operations.

use serde::{Deserialize, Serialize};

use crate::gen::enums::{FieldDataType, FieldRole, FieldRoleCategory};
use crate::gen::fields::{
    typename, CalculatedFieldFields, ColumnFieldFields, ColumnsConnectionFields, DatabaseFields,
    DatabaseTableFields, DatasourceFields, FieldFields, GroupFieldFields, TableFields,
    TableauUserFields, TagFields, WorkbookFields,
};
use crate::querybuilder::GraphQLField;

/// Concrete type behind a `Field` interface value.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum FieldKind {
    BinField,
    CalculatedField,
    ColumnField,
    CombinedField,
    CombinedSetField,
    DatasourceField,
    GroupField,
    HierarchyField,
    SetField,
}

/// Concrete type behind a `Datasource` interface value.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum DatasourceKind {
    EmbeddedDatasource,
    PublishedDatasource,
}

/// Concrete type behind a `Database` interface value.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum DatabaseKind {
    CloudFile,
    DataCloud,
    DatabaseServer,
    File,
    WebDataConnector,
}

/// Concrete type behind a `Table` interface value.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum TableKind {
    #[serde(rename = "CustomSQLTable")]
    CustomSqlTable,
    DatabaseTable,
    VirtualConnectionTable,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Owner {
    pub username: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TagRef {
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IdRef {
    pub id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NamedRef {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    pub total_count: i64,
}

/// The workbook a sheet or embedded data source belongs to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkbookRef {
    pub id: String,
    pub name: Option<String>,
    pub project_name: Option<String>,
    pub luid: String,
    pub owner: Option<Owner>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseRef {
    #[serde(rename = "__typename")]
    pub typename: DatabaseKind,
    pub id: String,
    pub name: Option<String>,
    pub connection_type: Option<String>,
}

/// A database table upstream of a data source or custom SQL query.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamTable {
    pub id: String,
    pub name: Option<String>,
    pub database: Option<DatabaseRef>,
    pub schema: Option<String>,
    pub full_name: Option<String>,
    pub connection_type: Option<String>,
    pub description: Option<String>,
    pub columns_connection: Option<TotalCount>,
}

/// Columns only selected on some concrete field types. Each is `None` when
/// the field's type does not carry it.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldDetails {
    pub data_category: Option<FieldRoleCategory>,
    pub role: Option<FieldRole>,
    pub data_type: Option<FieldDataType>,
    pub default_format: Option<String>,
    pub aggregation: Option<String>,
    pub formula: Option<String>,
}

/// A field of a data source, with its type-specific details.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatasourceFieldSummary {
    #[serde(rename = "__typename")]
    pub typename: FieldKind,
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_hidden: Option<bool>,
    pub folder_name: Option<String>,
    #[serde(flatten)]
    pub details: FieldDetails,
}

pub(crate) fn owner() -> GraphQLField {
    WorkbookFields::owner([TableauUserFields::username()])
}

pub(crate) fn tags() -> GraphQLField {
    WorkbookFields::tags([TagFields::name()])
}

pub(crate) fn workbook_ref(with_owner: bool) -> GraphQLField {
    let mut fields = vec![
        WorkbookFields::id(),
        WorkbookFields::name(),
        WorkbookFields::project_name(),
        WorkbookFields::luid(),
    ];
    if with_owner {
        fields.push(owner());
    }

    GraphQLField::new("workbook").fields(fields)
}

pub(crate) fn database_ref(with_connection_type: bool) -> GraphQLField {
    let mut fields = vec![DatabaseFields::name(), DatabaseFields::id()];
    if with_connection_type {
        fields.push(DatabaseFields::connection_type());
    }
    fields.push(typename());

    GraphQLField::new("database").fields(fields)
}

/// `upstreamTables{..}` or `tables{..}`; `detailed` adds the description and
/// column count.
pub(crate) fn upstream_tables(name: &str, detailed: bool) -> GraphQLField {
    let mut fields = vec![
        TableFields::id(),
        TableFields::name(),
        database_ref(false),
        DatabaseTableFields::schema(),
        DatabaseTableFields::full_name(),
        DatabaseTableFields::connection_type(),
    ];
    if detailed {
        fields.push(TableFields::description());
        fields.push(TableFields::columns_connection([
            ColumnsConnectionFields::total_count(),
        ]));
    }

    GraphQLField::new(name).fields(fields)
}

/// Adds the `ColumnField`, `CalculatedField` and `GroupField` fragments that
/// fill [`FieldDetails`].
pub(crate) fn with_field_details(field: GraphQLField, default_format: bool) -> GraphQLField {
    let mut column = vec![
        ColumnFieldFields::data_category(),
        ColumnFieldFields::role(),
        ColumnFieldFields::data_type(),
    ];
    let mut calculated = vec![CalculatedFieldFields::role(), CalculatedFieldFields::data_type()];
    if default_format {
        column.push(ColumnFieldFields::default_format());
        calculated.push(CalculatedFieldFields::default_format());
    }
    column.push(ColumnFieldFields::aggregation());
    calculated.push(CalculatedFieldFields::aggregation());
    calculated.push(CalculatedFieldFields::formula());

    field
        .on(ColumnFieldFields::TYPE_NAME, column)
        .on(CalculatedFieldFields::TYPE_NAME, calculated)
        .on(
            GroupFieldFields::TYPE_NAME,
            [GroupFieldFields::role(), GroupFieldFields::data_type()],
        )
}

/// `fields{..}` of a data source, decoding into [`DatasourceFieldSummary`].
pub(crate) fn datasource_fields() -> GraphQLField {
    with_field_details(
        DatasourceFields::fields([
            typename(),
            FieldFields::id(),
            FieldFields::name(),
            FieldFields::description(),
            FieldFields::is_hidden(),
            FieldFields::folder_name(),
        ]),
        true,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::gen::schema::validate;

    #[test]
    fn test_decode_field_summary() {
        let field: DatasourceFieldSummary = serde_json::from_str(
            r#"{
                "__typename": "CalculatedField",
                "id": "f1",
                "name": "Profit Ratio",
                "description": null,
                "isHidden": false,
                "folderName": null,
                "role": "MEASURE",
                "dataType": "REAL",
                "defaultFormat": "p0%",
                "aggregation": "SUM",
                "formula": "SUM([Profit])/SUM([Sales])"
            }"#,
        )
        .unwrap();

        assert_eq!(field.typename, FieldKind::CalculatedField);
        assert_eq!(field.details.role, Some(FieldRole::Measure));
        assert_eq!(field.details.data_category, None);
        assert_eq!(
            field.details.formula.as_deref(),
            Some("SUM([Profit])/SUM([Sales])")
        );
    }

    #[test]
    fn test_field_without_fragment_columns() {
        let field: DatasourceFieldSummary = serde_json::from_str(
            r#"{"__typename": "BinField", "id": "f2", "name": "Sales (bin)"}"#,
        )
        .unwrap();

        assert_eq!(field.details, FieldDetails::default());
    }

    #[test]
    fn test_unknown_typename_is_an_error() {
        let res = serde_json::from_str::<DatabaseRef>(
            r#"{"__typename": "Spreadsheet", "id": "d1", "name": null}"#,
        );

        assert!(res.is_err());
    }

    #[test]
    fn test_custom_sql_table_kind() {
        let kind: TableKind = serde_json::from_str("\"CustomSQLTable\"").unwrap();
        assert_eq!(kind, TableKind::CustomSqlTable);
    }

    #[test]
    fn test_helpers_match_schema() {
        assert_eq!(validate("PublishedDatasource", &[datasource_fields()]), Ok(()));
        assert_eq!(
            validate("CustomSQLTable", &[upstream_tables("tables", true)]),
            Ok(())
        );
        assert_eq!(validate("Sheet", &[workbook_ref(true)]), Ok(()));
    }
}
