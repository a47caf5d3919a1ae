//! A static mirror of the parts of the Tableau Metadata API schema this crate
//! queries. Selections are checked against it before they leave the process.

use thiserror::Error;

use crate::querybuilder::GraphQLField;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Object,
    Interface,
}

#[derive(Debug)]
pub struct FieldDef {
    pub name: &'static str,
    /// GraphQL type reference, e.g. `[Sheet!]!`.
    pub type_ref: &'static str,
    pub description: &'static str,
}

#[derive(Debug)]
pub struct TypeDef {
    pub name: &'static str,
    pub kind: TypeKind,
    pub description: &'static str,
    pub interfaces: &'static [&'static str],
    pub fields: &'static [FieldDef],
}

pub const SCALARS: &[&str] = &["ID", "String", "Boolean", "Int", "Float", "DateTime"];
pub const ENUMS: &[&str] = &["FieldDataType", "FieldRole", "FieldRoleCategory", "RemoteType"];

const fn field(name: &'static str, type_ref: &'static str, description: &'static str) -> FieldDef {
    FieldDef {
        name,
        type_ref,
        description,
    }
}

const METADATA_ID: &str = "Unique identifier used by the Metadata API, not the numeric id used on the server";
const DISPLAY_NAME: &str = "Name shown in server and desktop clients";
const SERVER_LUID: &str = "Locally unique identifier used by the REST API";
const NODES: &str = "List of nodes";
const PAGE_INFO: &str = "Information for pagination";
const TOTAL_COUNT: &str = "Total number of objects in connection";

const CONNECTION_ARGS: &str = "Fetch objects with support for pagination";

pub static TYPES: &[TypeDef] = &[
    TypeDef {
        name: "Query",
        kind: TypeKind::Object,
        description: "Root of every metadata query",
        interfaces: &[],
        fields: &[
            field("workbooks", "[Workbook!]!", "Fetch Workbooks"),
            field("workbooksConnection", "WorkbooksConnection!", CONNECTION_ARGS),
            field("sheets", "[Sheet!]!", "Fetch Sheets"),
            field("sheetsConnection", "SheetsConnection!", CONNECTION_ARGS),
            field("publishedDatasources", "[PublishedDatasource!]!", "Fetch PublishedDatasources"),
            field(
                "publishedDatasourcesConnection",
                "PublishedDatasourcesConnection!",
                CONNECTION_ARGS,
            ),
            field("embeddedDatasources", "[EmbeddedDatasource!]!", "Fetch EmbeddedDatasources"),
            field(
                "embeddedDatasourcesConnection",
                "EmbeddedDatasourcesConnection!",
                CONNECTION_ARGS,
            ),
            field("fields", "[Field!]!", "Fetch Fields"),
            field("fieldsConnection", "FieldsConnection!", CONNECTION_ARGS),
            field("customSQLTables", "[CustomSQLTable!]!", "Fetch CustomSQLTables"),
            field("customSQLTablesConnection", "CustomSQLTablesConnection!", CONNECTION_ARGS),
            field("databaseTables", "[DatabaseTable!]!", "Fetch DatabaseTables"),
            field("databaseTablesConnection", "DatabaseTablesConnection!", CONNECTION_ARGS),
        ],
    },
    TypeDef {
        name: "PageInfo",
        kind: TypeKind::Object,
        description: "Information about pagination in a connection",
        interfaces: &[],
        fields: &[
            field("hasNextPage", "Boolean!", "Indicates if there are more objects to fetch"),
            field("endCursor", "String", "Cursor to pass as `after` to fetch the next page"),
        ],
    },
    TypeDef {
        name: "WorkbooksConnection",
        kind: TypeKind::Object,
        description: "Connection type for Workbook",
        interfaces: &[],
        fields: &[
            field("nodes", "[Workbook!]!", NODES),
            field("pageInfo", "PageInfo!", PAGE_INFO),
            field("totalCount", "Int!", TOTAL_COUNT),
        ],
    },
    TypeDef {
        name: "SheetsConnection",
        kind: TypeKind::Object,
        description: "Connection type for Sheet",
        interfaces: &[],
        fields: &[
            field("nodes", "[Sheet!]!", NODES),
            field("pageInfo", "PageInfo!", PAGE_INFO),
            field("totalCount", "Int!", TOTAL_COUNT),
        ],
    },
    TypeDef {
        name: "PublishedDatasourcesConnection",
        kind: TypeKind::Object,
        description: "Connection type for PublishedDatasource",
        interfaces: &[],
        fields: &[
            field("nodes", "[PublishedDatasource!]!", NODES),
            field("pageInfo", "PageInfo!", PAGE_INFO),
            field("totalCount", "Int!", TOTAL_COUNT),
        ],
    },
    TypeDef {
        name: "EmbeddedDatasourcesConnection",
        kind: TypeKind::Object,
        description: "Connection type for EmbeddedDatasource",
        interfaces: &[],
        fields: &[
            field("nodes", "[EmbeddedDatasource!]!", NODES),
            field("pageInfo", "PageInfo!", PAGE_INFO),
            field("totalCount", "Int!", TOTAL_COUNT),
        ],
    },
    TypeDef {
        name: "FieldsConnection",
        kind: TypeKind::Object,
        description: "Connection type for Field",
        interfaces: &[],
        fields: &[
            field("nodes", "[Field!]!", NODES),
            field("pageInfo", "PageInfo!", PAGE_INFO),
            field("totalCount", "Int!", TOTAL_COUNT),
        ],
    },
    TypeDef {
        name: "CustomSQLTablesConnection",
        kind: TypeKind::Object,
        description: "Connection type for CustomSQLTable",
        interfaces: &[],
        fields: &[
            field("nodes", "[CustomSQLTable!]!", NODES),
            field("pageInfo", "PageInfo!", PAGE_INFO),
            field("totalCount", "Int!", TOTAL_COUNT),
        ],
    },
    TypeDef {
        name: "DatabaseTablesConnection",
        kind: TypeKind::Object,
        description: "Connection type for DatabaseTable",
        interfaces: &[],
        fields: &[
            field("nodes", "[DatabaseTable!]!", NODES),
            field("pageInfo", "PageInfo!", PAGE_INFO),
            field("totalCount", "Int!", TOTAL_COUNT),
        ],
    },
    TypeDef {
        name: "ColumnsConnection",
        kind: TypeKind::Object,
        description: "Connection type for Column",
        interfaces: &[],
        fields: &[
            field("nodes", "[Column!]!", NODES),
            field("pageInfo", "PageInfo!", PAGE_INFO),
            field("totalCount", "Int!", TOTAL_COUNT),
        ],
    },
    TypeDef {
        name: "TableauUser",
        kind: TypeKind::Object,
        description: "A user on the Tableau server",
        interfaces: &[],
        fields: &[
            field("id", "ID!", METADATA_ID),
            field("luid", "String!", SERVER_LUID),
            field("name", "String", "Display name of the user"),
            field("username", "String", "Username of the user"),
            field("email", "String", "Email address of the user"),
        ],
    },
    TypeDef {
        name: "Tag",
        kind: TypeKind::Object,
        description: "A tag associated with content items",
        interfaces: &[],
        fields: &[
            field("id", "ID!", METADATA_ID),
            field("name", "String", "Name of the tag"),
        ],
    },
    TypeDef {
        name: "Workbook",
        kind: TypeKind::Object,
        description: "A Tableau workbook",
        interfaces: &[],
        fields: &[
            field("id", "ID!", METADATA_ID),
            field("luid", "String!", SERVER_LUID),
            field("name", "String", DISPLAY_NAME),
            field("uri", "String", "Uri of the workbook"),
            field(
                "projectName",
                "String",
                "The name of the project in which the workbook is visible",
            ),
            field("description", "String", "Description of the workbook"),
            field("createdAt", "DateTime!", "Time the workbook was created"),
            field("updatedAt", "DateTime!", "Time the workbook was last updated"),
            field("owner", "TableauUser!", "User who owns this workbook"),
            field("tags", "[Tag!]!", "Tags associated with the workbook"),
            field("sheets", "[Sheet!]!", "Worksheets contained in this workbook"),
            field("dashboards", "[Dashboard!]!", "Dashboards contained in this workbook"),
            field(
                "embeddedDatasources",
                "[EmbeddedDatasource!]!",
                "Data sources embedded in this workbook",
            ),
            field(
                "upstreamDatasources",
                "[PublishedDatasource!]!",
                "Published data sources used by this workbook",
            ),
        ],
    },
    TypeDef {
        name: "Sheet",
        kind: TypeKind::Object,
        description: "A worksheet in a workbook",
        interfaces: &[],
        fields: &[
            field("id", "ID!", METADATA_ID),
            field("luid", "String!", SERVER_LUID),
            field("name", "String", DISPLAY_NAME),
            field("path", "String", "Server path to the sheet"),
            field("createdAt", "DateTime!", "Time the sheet was created"),
            field("updatedAt", "DateTime!", "Time the sheet was last updated"),
            field("tags", "[Tag!]!", "Tags associated with the sheet"),
            field("workbook", "Workbook", "The workbook that contains this sheet"),
            field("containedInDashboards", "[Dashboard]", "Dashboards that contain this sheet"),
            field("datasourceFields", "[Field]", "Data source fields used by this sheet"),
        ],
    },
    TypeDef {
        name: "Dashboard",
        kind: TypeKind::Object,
        description: "A dashboard in a workbook",
        interfaces: &[],
        fields: &[
            field("id", "ID!", METADATA_ID),
            field("luid", "String!", SERVER_LUID),
            field("name", "String", DISPLAY_NAME),
            field("path", "String", "Server path to the dashboard"),
            field("createdAt", "DateTime!", "Time the dashboard was created"),
            field("updatedAt", "DateTime!", "Time the dashboard was last updated"),
            field("workbook", "Workbook", "The workbook that contains this dashboard"),
            field("sheets", "[Sheet!]!", "Sheets placed on this dashboard"),
        ],
    },
    TypeDef {
        name: "Datasource",
        kind: TypeKind::Interface,
        description: "Root type for embedded and published data sources",
        interfaces: &[],
        fields: &[
            field("id", "ID!", METADATA_ID),
            field("name", "String", DISPLAY_NAME),
            field("hasExtracts", "Boolean", "True if the data source contains extracts"),
            field(
                "extractLastRefreshTime",
                "DateTime",
                "Time the extract was last fully refreshed",
            ),
            field(
                "extractLastIncrementalUpdateTime",
                "DateTime",
                "Time an incremental refresh last ran on the extract",
            ),
            field(
                "extractLastUpdateTime",
                "DateTime",
                "Time the extract was last refreshed, fully or incrementally",
            ),
            field("upstreamTables", "[DatabaseTable!]!", "Tables upstream from this data source"),
            field(
                "fields",
                "[Field!]!",
                "Fields usable in workbooks connected to this data source",
            ),
            field("downstreamSheets", "[Sheet!]!", "Sheets downstream from this data source"),
        ],
    },
    TypeDef {
        name: "PublishedDatasource",
        kind: TypeKind::Object,
        description: "A data source published to the server",
        interfaces: &["Datasource"],
        fields: &[
            field("luid", "String!", SERVER_LUID),
            field("uri", "String", "Uri of the data source"),
            field("projectName", "String", "The name of the project that contains the data source"),
            field("description", "String", "Description of the data source"),
            field("isCertified", "Boolean", "True if the data source is certified"),
            field("owner", "TableauUser!", "User who owns this data source"),
            field("tags", "[Tag!]!", "Tags associated with the data source"),
        ],
    },
    TypeDef {
        name: "EmbeddedDatasource",
        kind: TypeKind::Object,
        description: "A data source embedded in a workbook",
        interfaces: &["Datasource"],
        fields: &[
            field("workbook", "Workbook", "The workbook that contains this data source"),
            field(
                "upstreamDatasources",
                "[PublishedDatasource!]!",
                "Published data sources this data source connects to",
            ),
        ],
    },
    TypeDef {
        name: "Field",
        kind: TypeKind::Interface,
        description: "A field in a data source",
        interfaces: &[],
        fields: &[
            field("id", "ID!", METADATA_ID),
            field("name", "String", DISPLAY_NAME),
            field("description", "String", "Description of the field"),
            field("isHidden", "Boolean", "True if the field is hidden"),
            field("folderName", "String", "Folder the field belongs to"),
            field("datasource", "Datasource", "Data source that contains this field"),
            field("upstreamFields", "[Field]!", "Fields this field is derived from"),
            field("upstreamColumns", "[Column]!", "Columns this field is derived from"),
        ],
    },
    TypeDef {
        name: "ColumnField",
        kind: TypeKind::Object,
        description: "A field which directly connects to a column in a table",
        interfaces: &["Field"],
        fields: &[
            field("dataCategory", "FieldRoleCategory", "Category of the field role"),
            field("role", "FieldRole", "Role of the field"),
            field("dataType", "FieldDataType", "Type of the data in the field"),
            field("defaultFormat", "String", "Default format for number or date values"),
            field("aggregation", "String", "Default aggregation of the field"),
            field("columns", "[Column!]!", "Columns this field is connected to"),
        ],
    },
    TypeDef {
        name: "CalculatedField",
        kind: TypeKind::Object,
        description: "A field computed from a formula",
        interfaces: &["Field"],
        fields: &[
            field("role", "FieldRole", "Role of the field"),
            field("dataType", "FieldDataType", "Type of the data in the field"),
            field("defaultFormat", "String", "Default format for number or date values"),
            field("aggregation", "String", "Default aggregation of the field"),
            field("formula", "String", "Formula of the calculated field"),
        ],
    },
    TypeDef {
        name: "GroupField",
        kind: TypeKind::Object,
        description: "A field grouping members of another field",
        interfaces: &["Field"],
        fields: &[
            field("role", "FieldRole", "Role of the field"),
            field("dataType", "FieldDataType", "Type of the data in the field"),
        ],
    },
    TypeDef {
        name: "DatasourceField",
        kind: TypeKind::Object,
        description: "A field in a workbook that references a field of a published data source",
        interfaces: &["Field"],
        fields: &[
            field("remoteField", "Field", "The field in the published data source"),
        ],
    },
    TypeDef {
        name: "BinField",
        kind: TypeKind::Object,
        description: "A field that bins another field",
        interfaces: &["Field"],
        fields: &[],
    },
    TypeDef {
        name: "CombinedField",
        kind: TypeKind::Object,
        description: "A field combining several fields",
        interfaces: &["Field"],
        fields: &[],
    },
    TypeDef {
        name: "CombinedSetField",
        kind: TypeKind::Object,
        description: "A field combining several sets",
        interfaces: &["Field"],
        fields: &[],
    },
    TypeDef {
        name: "HierarchyField",
        kind: TypeKind::Object,
        description: "A hierarchy of fields",
        interfaces: &["Field"],
        fields: &[],
    },
    TypeDef {
        name: "SetField",
        kind: TypeKind::Object,
        description: "A set defined on a field",
        interfaces: &["Field"],
        fields: &[],
    },
    TypeDef {
        name: "Table",
        kind: TypeKind::Interface,
        description: "A table that is contained in a database",
        interfaces: &[],
        fields: &[
            field("id", "ID!", METADATA_ID),
            field("name", "String", DISPLAY_NAME),
            field("description", "String", "User modifiable description of this table"),
            field("columns", "[Column!]!", "Columns contained in this table"),
            field("columnsConnection", "ColumnsConnection", "Columns with support for pagination"),
        ],
    },
    TypeDef {
        name: "DatabaseTable",
        kind: TypeKind::Object,
        description: "A table that is contained in a database",
        interfaces: &["Table"],
        fields: &[
            field("isEmbedded", "Boolean", "True if this table is embedded in Tableau content"),
            field("schema", "String", "Name of the table schema"),
            field("fullName", "String", "Fully qualified table name"),
            field("connectionType", "String", "Connection type of the parent database"),
            field("database", "Database", "The database to which this table belongs"),
        ],
    },
    TypeDef {
        name: "CustomSQLTable",
        kind: TypeKind::Object,
        description: "The result of evaluating a custom SQL query inside a data source",
        interfaces: &["Table"],
        fields: &[
            field("query", "String", "Text of the query"),
            field("connectionType", "String", "Connection type shortname"),
            field("database", "Database", "Database this query is executed on"),
            field("tables", "[DatabaseTable!]!", "Actual tables that this query references"),
        ],
    },
    TypeDef {
        name: "VirtualConnectionTable",
        kind: TypeKind::Object,
        description: "A table in a virtual connection",
        interfaces: &["Table"],
        fields: &[],
    },
    TypeDef {
        name: "Column",
        kind: TypeKind::Object,
        description: "A table column",
        interfaces: &[],
        fields: &[
            field("id", "ID!", METADATA_ID),
            field("name", "String", "Name of the column"),
            field("description", "String", "User modifiable description of this column"),
            field("remoteType", "RemoteType!", "Remote type on the database"),
            field("isNullable", "Boolean", "True if the column may contain nulls"),
            field("table", "Table", "The table that contains this column"),
            field(
                "referencedByFields",
                "[ColumnField]",
                "The column fields that reference this column",
            ),
        ],
    },
    TypeDef {
        name: "Database",
        kind: TypeKind::Interface,
        description: "A database containing tables",
        interfaces: &[],
        fields: &[
            field("id", "ID!", METADATA_ID),
            field("name", "String", DISPLAY_NAME),
            field("connectionType", "String", "Connection type shortname"),
            field("description", "String", "User modifiable description of this database"),
            field("tables", "[DatabaseTable!]!", "Tables contained in this database"),
        ],
    },
    TypeDef {
        name: "CloudFile",
        kind: TypeKind::Object,
        description: "A file on a cloud storage provider",
        interfaces: &["Database"],
        fields: &[],
    },
    TypeDef {
        name: "DataCloud",
        kind: TypeKind::Object,
        description: "A Salesforce Data Cloud connection",
        interfaces: &["Database"],
        fields: &[],
    },
    TypeDef {
        name: "DatabaseServer",
        kind: TypeKind::Object,
        description: "A database server",
        interfaces: &["Database"],
        fields: &[],
    },
    TypeDef {
        name: "File",
        kind: TypeKind::Object,
        description: "A local file",
        interfaces: &["Database"],
        fields: &[],
    },
    TypeDef {
        name: "WebDataConnector",
        kind: TypeKind::Object,
        description: "A web data connector",
        interfaces: &["Database"],
        fields: &[],
    },
];

pub fn lookup(name: &str) -> Option<&'static TypeDef> {
    TYPES.iter().find(|t| t.name == name)
}

pub fn is_leaf(name: &str) -> bool {
    SCALARS.contains(&name) || ENUMS.contains(&name)
}

impl FieldDef {
    /// The type name with list and non-null wrappers removed.
    pub fn named_type(&self) -> &'static str {
        self.type_ref.trim_matches(|c| c == '[' || c == ']' || c == '!')
    }

    pub fn is_list(&self) -> bool {
        self.type_ref.starts_with('[')
    }

    pub fn is_non_null(&self) -> bool {
        self.type_ref.ends_with('!')
    }
}

impl TypeDef {
    /// Looks up a field on this type or on any interface it implements.
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        let own: &'static [FieldDef] = self.fields;

        own.iter().find(|f| f.name == name).or_else(|| {
            self.interfaces
                .iter()
                .filter_map(|i| lookup(i))
                .find_map(|i| i.field(name))
        })
    }

    /// Every field selectable on this type, interface fields first.
    pub fn all_fields(&self) -> Vec<&'static FieldDef> {
        let mut fields: Vec<&'static FieldDef> = self
            .interfaces
            .iter()
            .filter_map(|i| lookup(i))
            .flat_map(|i| i.all_fields())
            .collect();

        let own: &'static [FieldDef] = self.fields;
        fields.extend(own.iter());

        fields
    }

    pub fn implements(&self, interface: &str) -> bool {
        self.interfaces.contains(&interface)
    }

    /// The object types a value of this type can have at runtime.
    pub fn possible_types(&self) -> Vec<&'static TypeDef> {
        match self.kind {
            TypeKind::Object => lookup(self.name).into_iter().collect(),
            TypeKind::Interface => TYPES.iter().filter(|t| t.implements(self.name)).collect(),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("unknown type {0}")]
    UnknownType(String),
    #[error("{type_name} has no field {field}")]
    UnknownField { type_name: String, field: String },
    #[error("{type_name}.{field} is a leaf and cannot have a selection set")]
    LeafWithSelection { type_name: String, field: String },
    #[error("{type_name}.{field} returns {field_type} and needs a selection set")]
    MissingSelection {
        type_name: String,
        field: String,
        field_type: String,
    },
    #[error("fragment on {fragment} can never match {type_name}")]
    ImpossibleFragment { type_name: String, fragment: String },
    #[error("Query.{field} yields {found}, not {expected}")]
    NodeTypeMismatch {
        field: String,
        expected: String,
        found: String,
    },
}

/// The entity a `Query` root field yields: the list element type, or the
/// `nodes` element type of a connection.
pub fn node_type(root_field: &str) -> Result<&'static str, SchemaError> {
    let root = lookup("Query").ok_or_else(|| SchemaError::UnknownType("Query".to_string()))?;
    let named = root
        .field(root_field)
        .ok_or_else(|| SchemaError::UnknownField {
            type_name: "Query".to_string(),
            field: root_field.to_string(),
        })?
        .named_type();

    let target = lookup(named).ok_or_else(|| SchemaError::UnknownType(named.to_string()))?;
    match target.field("nodes") {
        Some(nodes) if named.ends_with("Connection") => Ok(nodes.named_type()),
        _ => Ok(named),
    }
}

/// Checks a selection set against the schema mirror, starting at `type_name`.
pub fn validate(type_name: &str, fields: &[GraphQLField]) -> Result<(), SchemaError> {
    let parent = lookup(type_name).ok_or_else(|| SchemaError::UnknownType(type_name.to_string()))?;

    for selected in fields {
        let has_selection =
            !selected.subfields().is_empty() || selected.fragments().next().is_some();

        if selected.name() == "__typename" {
            if has_selection {
                return Err(SchemaError::LeafWithSelection {
                    type_name: type_name.to_string(),
                    field: selected.name().to_string(),
                });
            }
            continue;
        }

        let def = parent
            .field(selected.name())
            .ok_or_else(|| SchemaError::UnknownField {
                type_name: type_name.to_string(),
                field: selected.name().to_string(),
            })?;
        let named = def.named_type();

        if is_leaf(named) {
            if has_selection {
                return Err(SchemaError::LeafWithSelection {
                    type_name: type_name.to_string(),
                    field: selected.name().to_string(),
                });
            }
            continue;
        }

        if !has_selection {
            return Err(SchemaError::MissingSelection {
                type_name: type_name.to_string(),
                field: selected.name().to_string(),
                field_type: def.type_ref.to_string(),
            });
        }

        validate(named, selected.subfields())?;

        let field_type = lookup(named).ok_or_else(|| SchemaError::UnknownType(named.to_string()))?;
        let possible = field_type.possible_types();

        for (fragment, fragment_fields) in selected.fragments() {
            let target =
                lookup(fragment).ok_or_else(|| SchemaError::UnknownType(fragment.to_string()))?;

            let overlaps = target
                .possible_types()
                .iter()
                .any(|t| possible.iter().any(|p| p.name == t.name));
            if !overlaps {
                return Err(SchemaError::ImpossibleFragment {
                    type_name: named.to_string(),
                    fragment: fragment.to_string(),
                });
            }

            validate(fragment, fragment_fields)?;
        }
    }

    Ok(())
}
