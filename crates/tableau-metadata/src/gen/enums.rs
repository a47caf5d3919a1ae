//! Enums of the metadata schema. Wire values are the upper-case GraphQL
//! names; unknown values fail to deserialize.

use serde::{Deserialize, Serialize};

/// Possible data types for a field.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldDataType {
    Boolean,
    Date,
    Datetime,
    Integer,
    Real,
    Spatial,
    String,
    Table,
    Tuple,
    Unknown,
}

impl FieldDataType {
    pub const ALL: [FieldDataType; 10] = [
        FieldDataType::Boolean,
        FieldDataType::Date,
        FieldDataType::Datetime,
        FieldDataType::Integer,
        FieldDataType::Real,
        FieldDataType::Spatial,
        FieldDataType::String,
        FieldDataType::Table,
        FieldDataType::Tuple,
        FieldDataType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldDataType::Boolean => "BOOLEAN",
            FieldDataType::Date => "DATE",
            FieldDataType::Datetime => "DATETIME",
            FieldDataType::Integer => "INTEGER",
            FieldDataType::Real => "REAL",
            FieldDataType::Spatial => "SPATIAL",
            FieldDataType::String => "STRING",
            FieldDataType::Table => "TABLE",
            FieldDataType::Tuple => "TUPLE",
            FieldDataType::Unknown => "UNKNOWN",
        }
    }
}

/// Possible roles of a field.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldRole {
    Dimension,
    Measure,
    Unknown,
}

impl FieldRole {
    pub const ALL: [FieldRole; 3] = [
        FieldRole::Dimension,
        FieldRole::Measure,
        FieldRole::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldRole::Dimension => "DIMENSION",
            FieldRole::Measure => "MEASURE",
            FieldRole::Unknown => "UNKNOWN",
        }
    }
}

/// Possible categories of a field role.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldRoleCategory {
    Nominal,
    Ordinal,
    Quantitative,
    Unknown,
}

impl FieldRoleCategory {
    pub const ALL: [FieldRoleCategory; 4] = [
        FieldRoleCategory::Nominal,
        FieldRoleCategory::Ordinal,
        FieldRoleCategory::Quantitative,
        FieldRoleCategory::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldRoleCategory::Nominal => "NOMINAL",
            FieldRoleCategory::Ordinal => "ORDINAL",
            FieldRoleCategory::Quantitative => "QUANTITATIVE",
            FieldRoleCategory::Unknown => "UNKNOWN",
        }
    }
}

/// Remote column types. Plain variants correspond to OLEDB types, `Wdc*`
/// variants to Tableau Web Data Connector types.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoteType {
    Array,
    Bool,
    Bstr,
    Byref,
    Bytes,
    Cy,
    Date,
    Dbdate,
    Dbtime,
    Dbtimestamp,
    Decimal,
    Empty,
    Error,
    Filetime,
    Guid,
    Hchapter,
    I1,
    I2,
    I4,
    I8,
    Idispatch,
    Iunknown,
    Null,
    Numeric,
    Propvariant,
    R4,
    R8,
    Reserved,
    Str,
    Udt,
    Ui1,
    Ui2,
    Ui4,
    Ui8,
    Variant,
    Varnumeric,
    Vector,
    WdcBool,
    WdcDate,
    WdcDatetime,
    WdcFloat,
    WdcGeometry,
    WdcInt,
    WdcString,
    Wstr,
}

impl RemoteType {
    pub const ALL: [RemoteType; 45] = [
        RemoteType::Array,
        RemoteType::Bool,
        RemoteType::Bstr,
        RemoteType::Byref,
        RemoteType::Bytes,
        RemoteType::Cy,
        RemoteType::Date,
        RemoteType::Dbdate,
        RemoteType::Dbtime,
        RemoteType::Dbtimestamp,
        RemoteType::Decimal,
        RemoteType::Empty,
        RemoteType::Error,
        RemoteType::Filetime,
        RemoteType::Guid,
        RemoteType::Hchapter,
        RemoteType::I1,
        RemoteType::I2,
        RemoteType::I4,
        RemoteType::I8,
        RemoteType::Idispatch,
        RemoteType::Iunknown,
        RemoteType::Null,
        RemoteType::Numeric,
        RemoteType::Propvariant,
        RemoteType::R4,
        RemoteType::R8,
        RemoteType::Reserved,
        RemoteType::Str,
        RemoteType::Udt,
        RemoteType::Ui1,
        RemoteType::Ui2,
        RemoteType::Ui4,
        RemoteType::Ui8,
        RemoteType::Variant,
        RemoteType::Varnumeric,
        RemoteType::Vector,
        RemoteType::WdcBool,
        RemoteType::WdcDate,
        RemoteType::WdcDatetime,
        RemoteType::WdcFloat,
        RemoteType::WdcGeometry,
        RemoteType::WdcInt,
        RemoteType::WdcString,
        RemoteType::Wstr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteType::Array => "ARRAY",
            RemoteType::Bool => "BOOL",
            RemoteType::Bstr => "BSTR",
            RemoteType::Byref => "BYREF",
            RemoteType::Bytes => "BYTES",
            RemoteType::Cy => "CY",
            RemoteType::Date => "DATE",
            RemoteType::Dbdate => "DBDATE",
            RemoteType::Dbtime => "DBTIME",
            RemoteType::Dbtimestamp => "DBTIMESTAMP",
            RemoteType::Decimal => "DECIMAL",
            RemoteType::Empty => "EMPTY",
            RemoteType::Error => "ERROR",
            RemoteType::Filetime => "FILETIME",
            RemoteType::Guid => "GUID",
            RemoteType::Hchapter => "HCHAPTER",
            RemoteType::I1 => "I1",
            RemoteType::I2 => "I2",
            RemoteType::I4 => "I4",
            RemoteType::I8 => "I8",
            RemoteType::Idispatch => "IDISPATCH",
            RemoteType::Iunknown => "IUNKNOWN",
            RemoteType::Null => "NULL",
            RemoteType::Numeric => "NUMERIC",
            RemoteType::Propvariant => "PROPVARIANT",
            RemoteType::R4 => "R4",
            RemoteType::R8 => "R8",
            RemoteType::Reserved => "RESERVED",
            RemoteType::Str => "STR",
            RemoteType::Udt => "UDT",
            RemoteType::Ui1 => "UI1",
            RemoteType::Ui2 => "UI2",
            RemoteType::Ui4 => "UI4",
            RemoteType::Ui8 => "UI8",
            RemoteType::Variant => "VARIANT",
            RemoteType::Varnumeric => "VARNUMERIC",
            RemoteType::Vector => "VECTOR",
            RemoteType::WdcBool => "WDC_BOOL",
            RemoteType::WdcDate => "WDC_DATE",
            RemoteType::WdcDatetime => "WDC_DATETIME",
            RemoteType::WdcFloat => "WDC_FLOAT",
            RemoteType::WdcGeometry => "WDC_GEOMETRY",
            RemoteType::WdcInt => "WDC_INT",
            RemoteType::WdcString => "WDC_STRING",
            RemoteType::Wstr => "WSTR",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkbookSortOrderField {
    Id,
    Name,
    ProjectName,
    CreatedAt,
    UpdatedAt,
}

impl WorkbookSortOrderField {
    pub const ALL: [WorkbookSortOrderField; 5] = [
        WorkbookSortOrderField::Id,
        WorkbookSortOrderField::Name,
        WorkbookSortOrderField::ProjectName,
        WorkbookSortOrderField::CreatedAt,
        WorkbookSortOrderField::UpdatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkbookSortOrderField::Id => "ID",
            WorkbookSortOrderField::Name => "NAME",
            WorkbookSortOrderField::ProjectName => "PROJECT_NAME",
            WorkbookSortOrderField::CreatedAt => "CREATED_AT",
            WorkbookSortOrderField::UpdatedAt => "UPDATED_AT",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SheetSortOrderField {
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

impl SheetSortOrderField {
    pub const ALL: [SheetSortOrderField; 4] = [
        SheetSortOrderField::Id,
        SheetSortOrderField::Name,
        SheetSortOrderField::CreatedAt,
        SheetSortOrderField::UpdatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SheetSortOrderField::Id => "ID",
            SheetSortOrderField::Name => "NAME",
            SheetSortOrderField::CreatedAt => "CREATED_AT",
            SheetSortOrderField::UpdatedAt => "UPDATED_AT",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublishedDatasourceSortOrderField {
    Id,
    Name,
    ProjectName,
}

impl PublishedDatasourceSortOrderField {
    pub const ALL: [PublishedDatasourceSortOrderField; 3] = [
        PublishedDatasourceSortOrderField::Id,
        PublishedDatasourceSortOrderField::Name,
        PublishedDatasourceSortOrderField::ProjectName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PublishedDatasourceSortOrderField::Id => "ID",
            PublishedDatasourceSortOrderField::Name => "NAME",
            PublishedDatasourceSortOrderField::ProjectName => "PROJECT_NAME",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmbeddedDatasourceSortOrderField {
    Id,
    Name,
}

impl EmbeddedDatasourceSortOrderField {
    pub const ALL: [EmbeddedDatasourceSortOrderField; 2] = [
        EmbeddedDatasourceSortOrderField::Id,
        EmbeddedDatasourceSortOrderField::Name,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddedDatasourceSortOrderField::Id => "ID",
            EmbeddedDatasourceSortOrderField::Name => "NAME",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldSortOrderField {
    Id,
    Name,
}

impl FieldSortOrderField {
    pub const ALL: [FieldSortOrderField; 2] = [
        FieldSortOrderField::Id,
        FieldSortOrderField::Name,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldSortOrderField::Id => "ID",
            FieldSortOrderField::Name => "NAME",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomSqlTableSortOrderField {
    Id,
    Name,
}

impl CustomSqlTableSortOrderField {
    pub const ALL: [CustomSqlTableSortOrderField; 2] = [
        CustomSqlTableSortOrderField::Id,
        CustomSqlTableSortOrderField::Name,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomSqlTableSortOrderField::Id => "ID",
            CustomSqlTableSortOrderField::Name => "NAME",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatabaseTableSortOrderField {
    Id,
    Name,
    FullName,
}

impl DatabaseTableSortOrderField {
    pub const ALL: [DatabaseTableSortOrderField; 3] = [
        DatabaseTableSortOrderField::Id,
        DatabaseTableSortOrderField::Name,
        DatabaseTableSortOrderField::FullName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseTableSortOrderField::Id => "ID",
            DatabaseTableSortOrderField::Name => "NAME",
            DatabaseTableSortOrderField::FullName => "FULL_NAME",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const ALL: [SortDirection; 2] = [SortDirection::Asc, SortDirection::Desc];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}
