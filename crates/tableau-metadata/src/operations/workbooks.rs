use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gen::fields::{DashboardFields, DatasourceFields, SheetFields, WorkbookFields};
use crate::gen::inputs::{WorkbookFilter, WorkbookSortOrder};
use crate::operations::common::{owner, tags, IdRef, Owner, TagRef};
use crate::operations::ConnectionQuery;
use crate::querybuilder::GraphQLField;

pub struct GetWorkbooks;

impl ConnectionQuery for GetWorkbooks {
    const OPERATION_NAME: &'static str = "GetWorkbooks";
    const CONNECTION_FIELD: &'static str = "workbooksConnection";
    const LIST_FIELD: &'static str = "workbooks";
    const NODE_TYPE: &'static str = "Workbook";

    type Filter = WorkbookFilter;
    type SortOrder = WorkbookSortOrder;
    type Node = Workbook;

    fn node_fields() -> Vec<GraphQLField> {
        vec![
            WorkbookFields::id(),
            WorkbookFields::name(),
            WorkbookFields::luid(),
            WorkbookFields::uri(),
            WorkbookFields::project_name(),
            owner(),
            WorkbookFields::description(),
            WorkbookFields::created_at(),
            WorkbookFields::updated_at(),
            tags(),
            WorkbookFields::sheets([SheetFields::id()]),
            WorkbookFields::dashboards([DashboardFields::id()]),
            WorkbookFields::embedded_datasources([DatasourceFields::id()]),
        ]
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workbook {
    pub id: String,
    pub name: Option<String>,
    pub luid: String,
    pub uri: Option<String>,
    pub project_name: Option<String>,
    pub owner: Owner,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<TagRef>,
    pub sheets: Vec<IdRef>,
    pub dashboards: Vec<IdRef>,
    pub embedded_datasources: Vec<IdRef>,
}
