use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gen::fields::{
    typename, DashboardFields, DatasourceFieldFields, DatasourceFields, FieldFields, SheetFields,
};
use crate::gen::inputs::{SheetFilter, SheetSortOrder};
use crate::operations::common::{
    tags, with_field_details, workbook_ref, DatasourceKind, FieldDetails, FieldKind, TagRef,
    WorkbookRef,
};
use crate::operations::ConnectionQuery;
use crate::querybuilder::GraphQLField;

pub struct GetSheets;

impl ConnectionQuery for GetSheets {
    const OPERATION_NAME: &'static str = "GetSheets";
    const CONNECTION_FIELD: &'static str = "sheetsConnection";
    const LIST_FIELD: &'static str = "sheets";
    const NODE_TYPE: &'static str = "Sheet";

    type Filter = SheetFilter;
    type SortOrder = SheetSortOrder;
    type Node = Sheet;

    fn node_fields() -> Vec<GraphQLField> {
        vec![
            SheetFields::id(),
            SheetFields::name(),
            SheetFields::path(),
            SheetFields::luid(),
            SheetFields::created_at(),
            SheetFields::updated_at(),
            tags(),
            SheetFields::contained_in_dashboards([
                DashboardFields::name(),
                DashboardFields::path(),
            ]),
            workbook_ref(true),
            datasource_fields(),
        ]
    }
}

fn datasource_fields() -> GraphQLField {
    let remote_field = with_field_details(
        DatasourceFieldFields::remote_field([
            typename(),
            FieldFields::id(),
            FieldFields::name(),
            FieldFields::description(),
            FieldFields::folder_name(),
        ]),
        false,
    );

    with_field_details(
        SheetFields::datasource_fields([
            typename(),
            FieldFields::id(),
            FieldFields::name(),
            FieldFields::description(),
            FieldFields::datasource([typename(), DatasourceFields::id(), DatasourceFields::name()]),
        ]),
        false,
    )
    .on(DatasourceFieldFields::TYPE_NAME, [remote_field])
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub id: String,
    pub name: Option<String>,
    pub path: Option<String>,
    pub luid: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<TagRef>,
    pub contained_in_dashboards: Option<Vec<Option<DashboardRef>>>,
    pub workbook: Option<WorkbookRef>,
    pub datasource_fields: Option<Vec<Option<SheetField>>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DashboardRef {
    pub name: Option<String>,
    pub path: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SheetDatasource {
    #[serde(rename = "__typename")]
    pub typename: DatasourceKind,
    pub id: String,
    pub name: Option<String>,
}

/// A data source field used by a sheet. `remote_field` is only set for
/// `DatasourceField`s, which point at a field of a published data source.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SheetField {
    #[serde(rename = "__typename")]
    pub typename: FieldKind,
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub datasource: Option<SheetDatasource>,
    pub remote_field: Option<RemoteField>,
    #[serde(flatten)]
    pub details: FieldDetails,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteField {
    #[serde(rename = "__typename")]
    pub typename: FieldKind,
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub folder_name: Option<String>,
    #[serde(flatten)]
    pub details: FieldDetails,
}
