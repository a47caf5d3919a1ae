//! Typed constructors for every selectable field of the schema mirror.
//!
//! Each `*Fields` namespace returns plain [`GraphQLField`]s, so they compose
//! with `alias`, `arg` and inline fragments like hand-built fields.

use crate::querybuilder::GraphQLField;

/// `__typename`, selectable on every object and interface.
pub fn typename() -> GraphQLField {
    GraphQLField::new("__typename")
}

/// Fields of `TableauUser`.
pub struct TableauUserFields;

impl TableauUserFields {
    pub const TYPE_NAME: &'static str = "TableauUser";

    /// Unique identifier used by the Metadata API, not the numeric id used on the server.
    pub fn id() -> GraphQLField {
        GraphQLField::new("id")
    }

    /// Locally unique identifier used by the REST API.
    pub fn luid() -> GraphQLField {
        GraphQLField::new("luid")
    }

    /// Display name of the user.
    pub fn name() -> GraphQLField {
        GraphQLField::new("name")
    }

    /// Username of the user.
    pub fn username() -> GraphQLField {
        GraphQLField::new("username")
    }

    /// Email address of the user.
    pub fn email() -> GraphQLField {
        GraphQLField::new("email")
    }
}

/// Fields of `Tag`.
pub struct TagFields;

impl TagFields {
    pub const TYPE_NAME: &'static str = "Tag";

    /// Unique identifier used by the Metadata API, not the numeric id used on the server.
    pub fn id() -> GraphQLField {
        GraphQLField::new("id")
    }

    /// Name of the tag.
    pub fn name() -> GraphQLField {
        GraphQLField::new("name")
    }
}

/// Fields of `Workbook`.
pub struct WorkbookFields;

impl WorkbookFields {
    pub const TYPE_NAME: &'static str = "Workbook";

    /// Unique identifier used by the Metadata API, not the numeric id used on the server.
    pub fn id() -> GraphQLField {
        GraphQLField::new("id")
    }

    /// Locally unique identifier used by the REST API.
    pub fn luid() -> GraphQLField {
        GraphQLField::new("luid")
    }

    /// Name shown in server and desktop clients.
    pub fn name() -> GraphQLField {
        GraphQLField::new("name")
    }

    /// Uri of the workbook.
    pub fn uri() -> GraphQLField {
        GraphQLField::new("uri")
    }

    /// The name of the project in which the workbook is visible.
    pub fn project_name() -> GraphQLField {
        GraphQLField::new("projectName")
    }

    /// Description of the workbook.
    pub fn description() -> GraphQLField {
        GraphQLField::new("description")
    }

    /// Time the workbook was created.
    pub fn created_at() -> GraphQLField {
        GraphQLField::new("createdAt")
    }

    /// Time the workbook was last updated.
    pub fn updated_at() -> GraphQLField {
        GraphQLField::new("updatedAt")
    }

    /// User who owns this workbook.
    pub fn owner(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("owner").fields(fields)
    }

    /// Tags associated with the workbook.
    pub fn tags(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("tags").fields(fields)
    }

    /// Worksheets contained in this workbook.
    pub fn sheets(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("sheets").fields(fields)
    }

    /// Dashboards contained in this workbook.
    pub fn dashboards(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("dashboards").fields(fields)
    }

    /// Data sources embedded in this workbook.
    pub fn embedded_datasources(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("embeddedDatasources").fields(fields)
    }

    /// Published data sources used by this workbook.
    pub fn upstream_datasources(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("upstreamDatasources").fields(fields)
    }
}

/// Fields of `Sheet`.
pub struct SheetFields;

impl SheetFields {
    pub const TYPE_NAME: &'static str = "Sheet";

    /// Unique identifier used by the Metadata API, not the numeric id used on the server.
    pub fn id() -> GraphQLField {
        GraphQLField::new("id")
    }

    /// Locally unique identifier used by the REST API.
    pub fn luid() -> GraphQLField {
        GraphQLField::new("luid")
    }

    /// Name shown in server and desktop clients.
    pub fn name() -> GraphQLField {
        GraphQLField::new("name")
    }

    /// Server path to the sheet.
    pub fn path() -> GraphQLField {
        GraphQLField::new("path")
    }

    /// Time the sheet was created.
    pub fn created_at() -> GraphQLField {
        GraphQLField::new("createdAt")
    }

    /// Time the sheet was last updated.
    pub fn updated_at() -> GraphQLField {
        GraphQLField::new("updatedAt")
    }

    /// Tags associated with the sheet.
    pub fn tags(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("tags").fields(fields)
    }

    /// The workbook that contains this sheet.
    pub fn workbook(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("workbook").fields(fields)
    }

    /// Dashboards that contain this sheet.
    pub fn contained_in_dashboards(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("containedInDashboards").fields(fields)
    }

    /// Data source fields used by this sheet.
    pub fn datasource_fields(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("datasourceFields").fields(fields)
    }
}

/// Fields of `Dashboard`.
pub struct DashboardFields;

impl DashboardFields {
    pub const TYPE_NAME: &'static str = "Dashboard";

    /// Unique identifier used by the Metadata API, not the numeric id used on the server.
    pub fn id() -> GraphQLField {
        GraphQLField::new("id")
    }

    /// Locally unique identifier used by the REST API.
    pub fn luid() -> GraphQLField {
        GraphQLField::new("luid")
    }

    /// Name shown in server and desktop clients.
    pub fn name() -> GraphQLField {
        GraphQLField::new("name")
    }

    /// Server path to the dashboard.
    pub fn path() -> GraphQLField {
        GraphQLField::new("path")
    }

    /// Time the dashboard was created.
    pub fn created_at() -> GraphQLField {
        GraphQLField::new("createdAt")
    }

    /// Time the dashboard was last updated.
    pub fn updated_at() -> GraphQLField {
        GraphQLField::new("updatedAt")
    }

    /// The workbook that contains this dashboard.
    pub fn workbook(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("workbook").fields(fields)
    }

    /// Sheets placed on this dashboard.
    pub fn sheets(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("sheets").fields(fields)
    }
}

/// Fields of `Datasource`.
pub struct DatasourceFields;

impl DatasourceFields {
    pub const TYPE_NAME: &'static str = "Datasource";

    /// Unique identifier used by the Metadata API, not the numeric id used on the server.
    pub fn id() -> GraphQLField {
        GraphQLField::new("id")
    }

    /// Name shown in server and desktop clients.
    pub fn name() -> GraphQLField {
        GraphQLField::new("name")
    }

    /// True if the data source contains extracts.
    pub fn has_extracts() -> GraphQLField {
        GraphQLField::new("hasExtracts")
    }

    /// Time the extract was last fully refreshed.
    pub fn extract_last_refresh_time() -> GraphQLField {
        GraphQLField::new("extractLastRefreshTime")
    }

    /// Time an incremental refresh last ran on the extract.
    pub fn extract_last_incremental_update_time() -> GraphQLField {
        GraphQLField::new("extractLastIncrementalUpdateTime")
    }

    /// Time the extract was last refreshed, fully or incrementally.
    pub fn extract_last_update_time() -> GraphQLField {
        GraphQLField::new("extractLastUpdateTime")
    }

    /// Tables upstream from this data source.
    pub fn upstream_tables(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("upstreamTables").fields(fields)
    }

    /// Fields usable in workbooks connected to this data source.
    pub fn fields(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("fields").fields(fields)
    }

    /// Sheets downstream from this data source.
    pub fn downstream_sheets(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("downstreamSheets").fields(fields)
    }
}

/// Fields of `PublishedDatasource`. Fields inherited from `Datasource` live on
/// [`DatasourceFields`].
pub struct PublishedDatasourceFields;

impl PublishedDatasourceFields {
    pub const TYPE_NAME: &'static str = "PublishedDatasource";

    /// Locally unique identifier used by the REST API.
    pub fn luid() -> GraphQLField {
        GraphQLField::new("luid")
    }

    /// Uri of the data source.
    pub fn uri() -> GraphQLField {
        GraphQLField::new("uri")
    }

    /// The name of the project that contains the data source.
    pub fn project_name() -> GraphQLField {
        GraphQLField::new("projectName")
    }

    /// Description of the data source.
    pub fn description() -> GraphQLField {
        GraphQLField::new("description")
    }

    /// True if the data source is certified.
    pub fn is_certified() -> GraphQLField {
        GraphQLField::new("isCertified")
    }

    /// User who owns this data source.
    pub fn owner(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("owner").fields(fields)
    }

    /// Tags associated with the data source.
    pub fn tags(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("tags").fields(fields)
    }
}

/// Fields of `EmbeddedDatasource`. Fields inherited from `Datasource` live on
/// [`DatasourceFields`].
pub struct EmbeddedDatasourceFields;

impl EmbeddedDatasourceFields {
    pub const TYPE_NAME: &'static str = "EmbeddedDatasource";

    /// The workbook that contains this data source.
    pub fn workbook(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("workbook").fields(fields)
    }

    /// Published data sources this data source connects to.
    pub fn upstream_datasources(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("upstreamDatasources").fields(fields)
    }
}

/// Fields of `Field`.
pub struct FieldFields;

impl FieldFields {
    pub const TYPE_NAME: &'static str = "Field";

    /// Unique identifier used by the Metadata API, not the numeric id used on the server.
    pub fn id() -> GraphQLField {
        GraphQLField::new("id")
    }

    /// Name shown in server and desktop clients.
    pub fn name() -> GraphQLField {
        GraphQLField::new("name")
    }

    /// Description of the field.
    pub fn description() -> GraphQLField {
        GraphQLField::new("description")
    }

    /// True if the field is hidden.
    pub fn is_hidden() -> GraphQLField {
        GraphQLField::new("isHidden")
    }

    /// Folder the field belongs to.
    pub fn folder_name() -> GraphQLField {
        GraphQLField::new("folderName")
    }

    /// Data source that contains this field.
    pub fn datasource(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("datasource").fields(fields)
    }

    /// Fields this field is derived from.
    pub fn upstream_fields(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("upstreamFields").fields(fields)
    }

    /// Columns this field is derived from.
    pub fn upstream_columns(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("upstreamColumns").fields(fields)
    }
}

/// Fields of `ColumnField`. Fields inherited from `Field` live on
/// [`FieldFields`].
pub struct ColumnFieldFields;

impl ColumnFieldFields {
    pub const TYPE_NAME: &'static str = "ColumnField";

    /// Category of the field role.
    pub fn data_category() -> GraphQLField {
        GraphQLField::new("dataCategory")
    }

    /// Role of the field.
    pub fn role() -> GraphQLField {
        GraphQLField::new("role")
    }

    /// Type of the data in the field.
    pub fn data_type() -> GraphQLField {
        GraphQLField::new("dataType")
    }

    /// Default format for number or date values.
    pub fn default_format() -> GraphQLField {
        GraphQLField::new("defaultFormat")
    }

    /// Default aggregation of the field.
    pub fn aggregation() -> GraphQLField {
        GraphQLField::new("aggregation")
    }

    /// Columns this field is connected to.
    pub fn columns(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("columns").fields(fields)
    }
}

/// Fields of `CalculatedField`. Fields inherited from `Field` live on
/// [`FieldFields`].
pub struct CalculatedFieldFields;

impl CalculatedFieldFields {
    pub const TYPE_NAME: &'static str = "CalculatedField";

    /// Role of the field.
    pub fn role() -> GraphQLField {
        GraphQLField::new("role")
    }

    /// Type of the data in the field.
    pub fn data_type() -> GraphQLField {
        GraphQLField::new("dataType")
    }

    /// Default format for number or date values.
    pub fn default_format() -> GraphQLField {
        GraphQLField::new("defaultFormat")
    }

    /// Default aggregation of the field.
    pub fn aggregation() -> GraphQLField {
        GraphQLField::new("aggregation")
    }

    /// Formula of the calculated field.
    pub fn formula() -> GraphQLField {
        GraphQLField::new("formula")
    }
}

/// Fields of `GroupField`. Fields inherited from `Field` live on
/// [`FieldFields`].
pub struct GroupFieldFields;

impl GroupFieldFields {
    pub const TYPE_NAME: &'static str = "GroupField";

    /// Role of the field.
    pub fn role() -> GraphQLField {
        GraphQLField::new("role")
    }

    /// Type of the data in the field.
    pub fn data_type() -> GraphQLField {
        GraphQLField::new("dataType")
    }
}

/// Fields of `DatasourceField`. Fields inherited from `Field` live on
/// [`FieldFields`].
pub struct DatasourceFieldFields;

impl DatasourceFieldFields {
    pub const TYPE_NAME: &'static str = "DatasourceField";

    /// The field in the published data source.
    pub fn remote_field(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("remoteField").fields(fields)
    }
}

/// Fields of `Table`.
pub struct TableFields;

impl TableFields {
    pub const TYPE_NAME: &'static str = "Table";

    /// Unique identifier used by the Metadata API, not the numeric id used on the server.
    pub fn id() -> GraphQLField {
        GraphQLField::new("id")
    }

    /// Name shown in server and desktop clients.
    pub fn name() -> GraphQLField {
        GraphQLField::new("name")
    }

    /// User modifiable description of this table.
    pub fn description() -> GraphQLField {
        GraphQLField::new("description")
    }

    /// Columns contained in this table.
    pub fn columns(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("columns").fields(fields)
    }

    /// Columns with support for pagination.
    pub fn columns_connection(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("columnsConnection").fields(fields)
    }
}

/// Fields of `DatabaseTable`. Fields inherited from `Table` live on
/// [`TableFields`].
pub struct DatabaseTableFields;

impl DatabaseTableFields {
    pub const TYPE_NAME: &'static str = "DatabaseTable";

    /// True if this table is embedded in Tableau content.
    pub fn is_embedded() -> GraphQLField {
        GraphQLField::new("isEmbedded")
    }

    /// Name of the table schema.
    pub fn schema() -> GraphQLField {
        GraphQLField::new("schema")
    }

    /// Fully qualified table name.
    pub fn full_name() -> GraphQLField {
        GraphQLField::new("fullName")
    }

    /// Connection type of the parent database.
    pub fn connection_type() -> GraphQLField {
        GraphQLField::new("connectionType")
    }

    /// The database to which this table belongs.
    pub fn database(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("database").fields(fields)
    }
}

/// Fields of `CustomSQLTable`. Fields inherited from `Table` live on
/// [`TableFields`].
pub struct CustomSqlTableFields;

impl CustomSqlTableFields {
    pub const TYPE_NAME: &'static str = "CustomSQLTable";

    /// Text of the query.
    pub fn query() -> GraphQLField {
        GraphQLField::new("query")
    }

    /// Connection type shortname.
    pub fn connection_type() -> GraphQLField {
        GraphQLField::new("connectionType")
    }

    /// Database this query is executed on.
    pub fn database(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("database").fields(fields)
    }

    /// Actual tables that this query references.
    pub fn tables(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("tables").fields(fields)
    }
}

/// Fields of `Column`.
pub struct ColumnFields;

impl ColumnFields {
    pub const TYPE_NAME: &'static str = "Column";

    /// Unique identifier used by the Metadata API, not the numeric id used on the server.
    pub fn id() -> GraphQLField {
        GraphQLField::new("id")
    }

    /// Name of the column.
    pub fn name() -> GraphQLField {
        GraphQLField::new("name")
    }

    /// User modifiable description of this column.
    pub fn description() -> GraphQLField {
        GraphQLField::new("description")
    }

    /// Remote type on the database.
    pub fn remote_type() -> GraphQLField {
        GraphQLField::new("remoteType")
    }

    /// True if the column may contain nulls.
    pub fn is_nullable() -> GraphQLField {
        GraphQLField::new("isNullable")
    }

    /// The table that contains this column.
    pub fn table(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("table").fields(fields)
    }

    /// The column fields that reference this column.
    pub fn referenced_by_fields(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("referencedByFields").fields(fields)
    }
}

/// Fields of `Database`.
pub struct DatabaseFields;

impl DatabaseFields {
    pub const TYPE_NAME: &'static str = "Database";

    /// Unique identifier used by the Metadata API, not the numeric id used on the server.
    pub fn id() -> GraphQLField {
        GraphQLField::new("id")
    }

    /// Name shown in server and desktop clients.
    pub fn name() -> GraphQLField {
        GraphQLField::new("name")
    }

    /// Connection type shortname.
    pub fn connection_type() -> GraphQLField {
        GraphQLField::new("connectionType")
    }

    /// User modifiable description of this database.
    pub fn description() -> GraphQLField {
        GraphQLField::new("description")
    }

    /// Tables contained in this database.
    pub fn tables(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("tables").fields(fields)
    }
}

/// Fields of `ColumnsConnection`.
pub struct ColumnsConnectionFields;

impl ColumnsConnectionFields {
    pub const TYPE_NAME: &'static str = "ColumnsConnection";

    /// List of nodes.
    pub fn nodes(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("nodes").fields(fields)
    }

    /// Information for pagination.
    pub fn page_info(fields: impl IntoIterator<Item = GraphQLField>) -> GraphQLField {
        GraphQLField::new("pageInfo").fields(fields)
    }

    /// Total number of objects in connection.
    pub fn total_count() -> GraphQLField {
        GraphQLField::new("totalCount")
    }
}
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::gen::schema::{lookup, validate};

    #[test]
    fn test_namespaces_match_schema() {
        for name in [
            WorkbookFields::TYPE_NAME,
            SheetFields::TYPE_NAME,
            PublishedDatasourceFields::TYPE_NAME,
            EmbeddedDatasourceFields::TYPE_NAME,
            ColumnFieldFields::TYPE_NAME,
            CustomSqlTableFields::TYPE_NAME,
            DatabaseTableFields::TYPE_NAME,
        ] {
            assert!(lookup(name).is_some(), "{name} missing from schema");
        }
    }

    #[test]
    fn test_compose_with_alias_and_fragments() {
        let field = SheetFields::datasource_fields([
            typename(),
            FieldFields::id(),
            FieldFields::name().alias("label"),
        ])
        .on(ColumnFieldFields::TYPE_NAME, [ColumnFieldFields::role()])
        .on(
            CalculatedFieldFields::TYPE_NAME,
            [CalculatedFieldFields::formula()],
        );

        assert_eq!(
            field.build().unwrap(),
            "datasourceFields{__typename id label:name ... on ColumnField{role} ... on CalculatedField{formula}}"
        );
        assert_eq!(validate("Sheet", &[field]), Ok(()));
    }

    #[test]
    fn test_sql_names() {
        assert_eq!(CustomSqlTableFields::TYPE_NAME, "CustomSQLTable");
        assert_eq!(
            DatabaseTableFields::full_name().build().unwrap(),
            "fullName"
        );
        assert_eq!(
            TableFields::columns_connection([ColumnsConnectionFields::total_count()])
                .build()
                .unwrap(),
            "columnsConnection{totalCount}"
        );
    }
}
